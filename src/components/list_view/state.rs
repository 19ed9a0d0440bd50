use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr};

/// Which of the mutually exclusive list views is shown. Set by the owner of
/// the data, never derived by the list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, FromRepr, Serialize, Deserialize)]
#[repr(u8)]
pub enum ListState {
  Loading = 0,
  Empty = 1,
  Ok = 2,
  End = 3,
  Error = 4,
}

/// A list state as received from the caller. Codes outside the known states
/// are kept so they can be shown instead of silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
  Known(ListState),
  Unknown(u8),
}

impl Default for Status {
  fn default() -> Self {
    Status::Known(ListState::Loading)
  }
}

impl From<ListState> for Status {
  fn from(state: ListState) -> Self {
    Status::Known(state)
  }
}

impl From<u8> for Status {
  fn from(code: u8) -> Self {
    match ListState::from_repr(code) {
      Some(state) => Status::Known(state),
      None => Status::Unknown(code),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_from_code() {
    assert_eq!(Status::from(0), Status::Known(ListState::Loading));
    assert_eq!(Status::from(1), Status::Known(ListState::Empty));
    assert_eq!(Status::from(2), Status::Known(ListState::Ok));
    assert_eq!(Status::from(3), Status::Known(ListState::End));
    assert_eq!(Status::from(4), Status::Known(ListState::Error));
    assert_eq!(Status::from(5), Status::Unknown(5));
    assert_eq!(Status::from(u8::MAX), Status::Unknown(u8::MAX));
  }

  #[test]
  fn test_default_is_loading() {
    assert_eq!(Status::default(), Status::Known(ListState::Loading));
  }
}
