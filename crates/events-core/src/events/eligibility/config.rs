use serde::{Deserialize, Serialize};

/// Capacity-warning thresholds applied by the eligibility engine.
///
/// An event that is still registrable is flagged as filling up once the
/// remaining spots drop to `low_spot_floor` or below, or once they fall under
/// `low_spot_share` of total capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPolicy {
    pub low_spot_floor: u32,
    pub low_spot_share: f64,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            low_spot_floor: 5,
            low_spot_share: 0.10,
        }
    }
}
