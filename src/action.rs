use serde::{Deserialize, Serialize};
use strum::Display;

use crate::datum::Datum;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  Activate,
  Back,
  ClearSearch,
  EndInputMode,
  Error(String),
  /// A fetch failed; carries the id of the fetch that produced it.
  FetchFailed(u64, String),
  InputSubmitted(String),
  Navigate(String),
  NextPage,
  PreviousPage,
  Quit,
  Refresh,
  Render,
  Resize(u16, u16),
  Resume,
  /// A fetch resolved; carries the id of the fetch that produced it.
  RowsLoaded(u64, Vec<Datum>),
  SelectNext,
  SelectPrevious,
  SetPage(u32),
  StartInputMode,
  Suspend,
  Tick,
}
