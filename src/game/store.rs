use super::constants::{DOUBLE_POINTS_COST, SPEED_BOOST_COST};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreItem {
  SpeedBoost,
  DoublePoints,
}

impl StoreItem {
  pub fn cost(self) -> u32 {
    match self {
      StoreItem::SpeedBoost => SPEED_BOOST_COST,
      StoreItem::DoublePoints => DOUBLE_POINTS_COST,
    }
  }
}
