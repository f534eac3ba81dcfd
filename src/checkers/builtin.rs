#![forbid(unsafe_code)]

//! Builtin checkers compiled into the binary
//!
//! The builtin set is the static registration list: each checker implements the
//! [`Checker`] trait and is constructed here at discovery time, so the binary is
//! self-contained and no code is loaded from the filesystem.

use crate::checkers::doors::DoorAccessibility;
use crate::checkers::rooms::RoomHeights;
use crate::checkers::stairs::StairDimensions;
use crate::checkers::walls::WallFireRating;
use crate::checkers::windows::WindowThermal;
use crate::checkers::Checker;
use crate::error::DiscoveryError;

/// Construct the builtin checker set
///
/// # Errors
///
/// Returns `DiscoveryError` if a builtin checker fails to construct (a property
/// pattern does not compile).
pub fn builtin_checkers() -> Result<Vec<Box<dyn Checker>>, DiscoveryError> {
    Ok(vec![
        Box::new(DoorAccessibility::new()?),
        Box::new(RoomHeights::new()?),
        Box::new(StairDimensions::new()?),
        Box::new(WallFireRating::new()?),
        Box::new(WindowThermal::new()?),
    ])
}
