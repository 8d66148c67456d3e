#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use graylab_image as image;

#[doc(inline)]
pub use graylab_imgproc as imgproc;

#[doc(inline)]
pub use graylab_io as io;
