#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image cropping module.
pub mod crop;

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// compute image histogram module.
pub mod histogram;

/// point transforms on 8-bit images.
pub mod intensity;

/// image padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// intensity profiles along rows and columns.
pub mod profile;
