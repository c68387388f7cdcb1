//! Random test-data factories
//!
//! All generators take the random source explicitly:
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use sakusou::factory;
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let name = factory::alphanumeric(&mut rng, 12);
//! let email = factory::email_address(&mut rng, 24, factory::DEFAULT_EMAIL_DOMAIN);
//! assert_eq!(name.len(), 12);
//! assert_eq!(email.len(), 24);
//! ```

pub mod file;
pub mod string;

pub use self::file::{
    DEFAULT_ASCII_OUTPUT, DEFAULT_BINARY_OUTPUT, DEFAULT_IMAGE_OUTPUT, DEFAULT_VIDEO_OUTPUT,
    VIDEO_FPS, make_ascii_file, make_binary_file, make_image_file, make_video_file,
};
pub use self::string::{
    DEFAULT_EMAIL_DOMAIN, alphanumeric, alphanumeric_symbol, decimal, email_address, hexadecimal,
    ip_address, jp_alphabet, uuid,
};
