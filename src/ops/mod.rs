pub use self::blit::{BlitFilter, BlitMask};

mod blit;
