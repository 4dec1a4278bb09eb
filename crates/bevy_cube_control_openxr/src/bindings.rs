use std::borrow::Cow;

use bevy_cube_control::ControllerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hand {
    #[default]
    Left,
    Right,
}

impl Hand {
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];

    /// Top level user path, also used as the subaction path.
    pub fn path(self) -> &'static str {
        match self {
            Hand::Left => "/user/hand/left",
            Hand::Right => "/user/hand/right",
        }
    }

    pub fn controller_id(self) -> ControllerId {
        match self {
            Hand::Left => ControllerId(0),
            Hand::Right => ControllerId(1),
        }
    }

    pub fn input_path(self, input: &str) -> Cow<'static, str> {
        format!("{}/input/{input}", self.path()).into()
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Input components for one interaction profile, given as `[left, right]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBindings {
    pub profile: &'static str,
    pub bumper: [&'static str; 2],
    pub home: [&'static str; 2],
    pub trigger: [&'static str; 2],
    pub touchpad: [&'static str; 2],
    pub touchpad_force: [&'static str; 2],
}

impl ProfileBindings {
    pub fn paths(&self, inputs: [&'static str; 2]) -> Vec<Cow<'static, str>> {
        Hand::BOTH
            .iter()
            .map(|hand| hand.input_path(inputs[hand.index()]))
            .collect()
    }
}

pub const MAGIC_LEAP_2: ProfileBindings = ProfileBindings {
    profile: "/interaction_profiles/ml/ml2_controller",
    bumper: ["shoulder/click"; 2],
    // the home button is reserved by the runtime
    home: ["menu/click"; 2],
    trigger: ["trigger/value"; 2],
    touchpad: ["trackpad"; 2],
    touchpad_force: ["trackpad/force"; 2],
};

pub const VALVE_INDEX: ProfileBindings = ProfileBindings {
    profile: "/interaction_profiles/valve/index_controller",
    bumper: ["b/click"; 2],
    home: ["a/click"; 2],
    trigger: ["trigger/value"; 2],
    touchpad: ["trackpad"; 2],
    touchpad_force: ["trackpad/force"; 2],
};

//no touchpad, the thumbstick stands in and touching it counts as full force
pub const OCULUS_TOUCH: ProfileBindings = ProfileBindings {
    profile: "/interaction_profiles/oculus/touch_controller",
    bumper: ["y/click", "b/click"],
    home: ["x/click", "a/click"],
    trigger: ["trigger/value"; 2],
    touchpad: ["thumbstick"; 2],
    touchpad_force: ["thumbstick/touch"; 2],
};

pub const DEFAULT_PROFILES: [ProfileBindings; 3] = [MAGIC_LEAP_2, VALVE_INDEX, OCULUS_TOUCH];
