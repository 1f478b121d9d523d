use std::cmp::Ordering;

use crate::backend::Device;
use crate::gl;

/// Describes a version.
///
/// Versions of different APIs can't be compared with each other: both `a < b` and `a >= b`
/// are false when `a` is a desktop version and `b` is an embedded one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Version(pub Api, pub u8, pub u8);

/// Describes the corresponding API.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Api {
    /// Regular OpenGL.
    Gl,
    /// OpenGL embedded system.
    GlEs,
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        if self.0 != other.0 {
            return None;
        }

        match self.1.cmp(&other.1) {
            Ordering::Equal => Some(self.2.cmp(&other.2)),
            a => Some(a)
        }
    }
}

impl Version {
    /// Parses the content of `GL_VERSION`.
    ///
    /// Desktop drivers return something like `4.6.0 NVIDIA 535.54`, embedded ones prefix the
    /// numbers with `OpenGL ES `. Returns `None` if the string doesn't start with a
    /// `major.minor` pair.
    pub fn parse(version: &str) -> Option<Version> {
        let (version, api) = if let Some(rest) = version.strip_prefix("OpenGL ES ") {
            // ES 1.x drivers report `OpenGL ES-CM 1.1`, which never reaches this branch
            (rest, Api::GlEs)
        } else {
            (version, Api::Gl)
        };

        let version = version.split_whitespace().next()?;

        let mut iter = version.split('.');
        let major = iter.next()?.parse().ok()?;
        let minor = iter.next()?.parse().ok()?;

        Some(Version(api, major, minor))
    }
}

/// Obtains the version of the device.
pub fn get_gl_version(device: &dyn Device) -> Option<Version> {
    device.get_string(gl::VERSION).as_deref().and_then(Version::parse)
}

#[cfg(test)]
mod tests {
    use super::{Api, Version};

    #[test]
    fn parse_desktop() {
        assert_eq!(Version::parse("4.6.0 NVIDIA 535.54.03"), Some(Version(Api::Gl, 4, 6)));
        assert_eq!(Version::parse("3.3 (Core Profile) Mesa 23.1.0"), Some(Version(Api::Gl, 3, 3)));
    }

    #[test]
    fn parse_embedded() {
        assert_eq!(Version::parse("OpenGL ES 3.2 Mesa 23.1.0"), Some(Version(Api::GlEs, 3, 2)));
        assert_eq!(Version::parse("OpenGL ES 2.0"), Some(Version(Api::GlEs, 2, 0)));
    }

    #[test]
    fn parse_garbage() {
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("OpenGL ES-CM 1.1"), None);
        assert_eq!(Version::parse("four point six"), None);
        assert_eq!(Version::parse("4"), None);
    }

    #[test]
    fn cross_api_comparison() {
        let gl = Version(Api::Gl, 3, 0);
        let es = Version(Api::GlEs, 3, 0);

        assert!(!(gl >= es));
        assert!(!(gl < es));
        assert!(Version(Api::Gl, 3, 3) > Version(Api::Gl, 3, 0));
        assert!(Version(Api::GlEs, 2, 0) < Version(Api::GlEs, 3, 0));
    }
}
