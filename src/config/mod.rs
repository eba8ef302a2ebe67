//! Configuration module for bridgeroad-traffic

mod profiles;

pub use profiles::{
    user_profile_path, DetectionPoint, DetectionProfile, ProfileBuilder, ProfilePreset,
    ProfileSet,
};
