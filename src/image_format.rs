/*!
Formats of the images that can be attached to a framebuffer, and whether the device can render
to them.

Renderability depends on the kind of storage (texture or renderbuffer), on the API version and
on the extensions. The rules below follow the "required formats" tables of the OpenGL and
OpenGL ES specifications, plus the extensions that extend them.

*/
use crate::context::ExtensionsList;
use crate::version::{Api, Version};
use crate::CapabilitiesSource;

/// Format of an image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Normalized or floating-point color format.
    UncompressedFloat(UncompressedFloatFormat),
    /// Signed integral color format.
    UncompressedIntegral(UncompressedIntFormat),
    /// Unsigned integral color format.
    UncompressedUnsigned(UncompressedUintFormat),
    /// Depth-only format.
    DepthFormat(DepthFormat),
    /// Stencil-only format.
    StencilFormat(StencilFormat),
    /// Packed depth and stencil format.
    DepthStencilFormat(DepthStencilFormat),
}

/// The storage an image lives in.
///
/// Some formats are only renderable in one of the two.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// A two-dimensional texture or a face of a cube map.
    Texture,
    /// A renderbuffer.
    RenderBuffer,
}

/// List of uncompressed pixel formats that contain floating-point-like data.
///
/// Names are the component sizes in order. `U` is an unsigned normalized component, `I` a
/// signed normalized one, `F` a floating-point one.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UncompressedFloatFormat {
    U8,
    I8,
    U16,
    I16,
    U8U8,
    I8I8,
    U16U16,
    I16I16,
    U5U6U5,
    U8U8U8,
    I8I8I8,
    U16U16U16,
    I16I16I16,
    U4U4U4U4,
    U5U5U5U1,
    U8U8U8U8,
    I8I8I8I8,
    U10U10U10U2,
    U16U16U16U16,
    F16,
    F16F16,
    F16F16F16,
    F16F16F16F16,
    F32,
    F32F32,
    F32F32F32,
    F32F32F32F32,
    F11F11F10,
}

impl UncompressedFloatFormat {
    /// Turns this format into a more generic `TextureFormat`.
    #[inline]
    pub fn to_texture_format(self) -> TextureFormat {
        TextureFormat::UncompressedFloat(self)
    }

    fn is_color_renderable(&self, storage: StorageKind, version: &Version,
                           extensions: &ExtensionsList) -> bool
    {
        let desktop = version.0 == Api::Gl;
        let gl3 = version >= &Version(Api::Gl, 3, 0);
        let es3 = version >= &Version(Api::GlEs, 3, 0);

        match *self {
            // embedded 2.0 can render to byte textures, but only has 16-bit renderbuffers
            // without extensions
            UncompressedFloatFormat::U8U8U8U8 => {
                desktop || es3 || storage == StorageKind::Texture ||
                extensions.gl_oes_rgb8_rgba8 || extensions.gl_arm_rgba8
            },

            // not required by the specs, but renderable everywhere in practice
            UncompressedFloatFormat::U8U8U8 => {
                desktop || es3 || storage == StorageKind::Texture || extensions.gl_oes_rgb8_rgba8
            },

            UncompressedFloatFormat::U4U4U4U4 | UncompressedFloatFormat::U5U5U5U1 => true,

            UncompressedFloatFormat::U5U6U5 => {
                !desktop || version >= &Version(Api::Gl, 4, 1) ||
                extensions.gl_arb_es2_compatibility
            },

            UncompressedFloatFormat::U8 | UncompressedFloatFormat::U8U8 => {
                gl3 || es3 || (desktop && extensions.gl_arb_texture_rg)
            },

            UncompressedFloatFormat::U16 | UncompressedFloatFormat::U16U16 => {
                gl3 || (desktop && extensions.gl_arb_texture_rg)
            },

            UncompressedFloatFormat::U16U16U16U16 => desktop,

            UncompressedFloatFormat::U10U10U10U2 => desktop || es3,

            UncompressedFloatFormat::F16 | UncompressedFloatFormat::F16F16 |
            UncompressedFloatFormat::F16F16F16F16 => {
                if desktop {
                    gl3 || extensions.gl_arb_texture_float
                } else {
                    (es3 && extensions.gl_ext_color_buffer_float) ||
                    extensions.gl_ext_color_buffer_half_float
                }
            },

            UncompressedFloatFormat::F32 | UncompressedFloatFormat::F32F32 |
            UncompressedFloatFormat::F32F32F32F32 | UncompressedFloatFormat::F11F11F10 => {
                if desktop {
                    gl3 || extensions.gl_arb_texture_float
                } else {
                    es3 && extensions.gl_ext_color_buffer_float
                }
            },

            // three-component formats wider than 8 bits and signed normalized formats are
            // never color-renderable
            UncompressedFloatFormat::I8 | UncompressedFloatFormat::I16 |
            UncompressedFloatFormat::I8I8 | UncompressedFloatFormat::I16I16 |
            UncompressedFloatFormat::I8I8I8 | UncompressedFloatFormat::U16U16U16 |
            UncompressedFloatFormat::I16I16I16 | UncompressedFloatFormat::I8I8I8I8 |
            UncompressedFloatFormat::F16F16F16 | UncompressedFloatFormat::F32F32F32 => false,
        }
    }
}

/// List of uncompressed pixel formats that contain signed integral data.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UncompressedIntFormat {
    I8,
    I16,
    I32,
    I8I8,
    I16I16,
    I32I32,
    I8I8I8,
    I16I16I16,
    I32I32I32,
    I8I8I8I8,
    I16I16I16I16,
    I32I32I32I32,
}

impl UncompressedIntFormat {
    /// Turns this format into a more generic `TextureFormat`.
    #[inline]
    pub fn to_texture_format(self) -> TextureFormat {
        TextureFormat::UncompressedIntegral(self)
    }

    fn is_three_components(&self) -> bool {
        matches!(*self, UncompressedIntFormat::I8I8I8 | UncompressedIntFormat::I16I16I16 |
                        UncompressedIntFormat::I32I32I32)
    }
}

/// List of uncompressed pixel formats that contain unsigned integral data.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UncompressedUintFormat {
    U8,
    U16,
    U32,
    U8U8,
    U16U16,
    U32U32,
    U8U8U8,
    U16U16U16,
    U32U32U32,
    U8U8U8U8,
    U16U16U16U16,
    U32U32U32U32,
    U10U10U10U2,
}

impl UncompressedUintFormat {
    /// Turns this format into a more generic `TextureFormat`.
    #[inline]
    pub fn to_texture_format(self) -> TextureFormat {
        TextureFormat::UncompressedUnsigned(self)
    }

    fn is_three_components(&self) -> bool {
        matches!(*self, UncompressedUintFormat::U8U8U8 | UncompressedUintFormat::U16U16U16 |
                        UncompressedUintFormat::U32U32U32)
    }
}

/// List of formats available for depth textures and renderbuffers.
///
/// `I16`, `I24` and `I32` are still treated as normalized floating-point values.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DepthFormat {
    I16,
    I24,
    /// May not be supported by all hardware.
    I32,
    F32,
}

impl DepthFormat {
    /// Turns this format into a more generic `TextureFormat`.
    #[inline]
    pub fn to_texture_format(self) -> TextureFormat {
        TextureFormat::DepthFormat(self)
    }
}

/// List of formats available for stencil textures and renderbuffers.
///
/// Only `I8` is guaranteed to be supported. Stencil textures need OpenGL 4.4, OpenGL ES 3.2
/// or an extension.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StencilFormat {
    I1,
    I4,
    I8,
    I16,
}

impl StencilFormat {
    /// Turns this format into a more generic `TextureFormat`.
    #[inline]
    pub fn to_texture_format(self) -> TextureFormat {
        TextureFormat::StencilFormat(self)
    }
}

/// List of formats available for depth-stencil textures and renderbuffers.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DepthStencilFormat {
    I24I8,
    F32I8,
}

impl DepthStencilFormat {
    /// Turns this format into a more generic `TextureFormat`.
    #[inline]
    pub fn to_texture_format(self) -> TextureFormat {
        TextureFormat::DepthStencilFormat(self)
    }
}

impl TextureFormat {
    /// Returns the number of bits of the depth component, or 0 for non-depth formats.
    pub fn get_depth_bits(&self) -> u16 {
        match *self {
            TextureFormat::DepthFormat(DepthFormat::I16) => 16,
            TextureFormat::DepthFormat(DepthFormat::I24) => 24,
            TextureFormat::DepthFormat(DepthFormat::I32) => 32,
            TextureFormat::DepthFormat(DepthFormat::F32) => 32,
            TextureFormat::DepthStencilFormat(DepthStencilFormat::I24I8) => 24,
            TextureFormat::DepthStencilFormat(DepthStencilFormat::F32I8) => 32,
            _ => 0,
        }
    }

    /// Returns the number of bits of the stencil component, or 0 for non-stencil formats.
    pub fn get_stencil_bits(&self) -> u16 {
        match *self {
            TextureFormat::StencilFormat(StencilFormat::I1) => 1,
            TextureFormat::StencilFormat(StencilFormat::I4) => 4,
            TextureFormat::StencilFormat(StencilFormat::I8) => 8,
            TextureFormat::StencilFormat(StencilFormat::I16) => 16,
            TextureFormat::DepthStencilFormat(_) => 8,
            _ => 0,
        }
    }

    /// Returns true if the device can render color to an image of this format.
    pub fn is_color_renderable<C: ?Sized>(&self, storage: StorageKind, context: &C) -> bool
        where C: CapabilitiesSource
    {
        let version = context.get_version();
        let extensions = context.get_extensions();

        let gl3 = version >= &Version(Api::Gl, 3, 0);
        let es3 = version >= &Version(Api::GlEs, 3, 0);
        let integers = gl3 || es3 || (version.0 == Api::Gl && extensions.gl_ext_texture_integer);

        match *self {
            TextureFormat::UncompressedFloat(f) => {
                f.is_color_renderable(storage, version, extensions)
            },
            TextureFormat::UncompressedIntegral(f) => integers && !f.is_three_components(),
            TextureFormat::UncompressedUnsigned(UncompressedUintFormat::U10U10U10U2) => {
                version >= &Version(Api::Gl, 3, 3) || es3
            },
            TextureFormat::UncompressedUnsigned(f) => integers && !f.is_three_components(),
            TextureFormat::DepthFormat(_) | TextureFormat::StencilFormat(_) |
            TextureFormat::DepthStencilFormat(_) => false,
        }
    }

    /// Returns true if the device can render depth values to an image of this format.
    pub fn is_depth_renderable<C: ?Sized>(&self, storage: StorageKind, context: &C) -> bool
        where C: CapabilitiesSource
    {
        let version = context.get_version();
        let extensions = context.get_extensions();

        let desktop = version.0 == Api::Gl;
        let gl3 = version >= &Version(Api::Gl, 3, 0);
        let es3 = version >= &Version(Api::GlEs, 3, 0);

        let depth_textures = if desktop {
            gl3 || extensions.gl_arb_depth_texture
        } else {
            es3 || extensions.gl_oes_depth_texture
        };

        match (*self, storage) {
            (TextureFormat::DepthFormat(DepthFormat::F32), _) => gl3 || es3,
            (TextureFormat::DepthFormat(_), StorageKind::Texture) => depth_textures,
            (TextureFormat::DepthFormat(DepthFormat::I16), StorageKind::RenderBuffer) => true,
            (TextureFormat::DepthFormat(DepthFormat::I24), StorageKind::RenderBuffer) => {
                desktop || es3 || extensions.gl_oes_depth24
            },
            (TextureFormat::DepthFormat(DepthFormat::I32), StorageKind::RenderBuffer) => {
                desktop || extensions.gl_oes_depth32
            },

            (TextureFormat::DepthStencilFormat(DepthStencilFormat::F32I8), _) => gl3 || es3,
            (TextureFormat::DepthStencilFormat(DepthStencilFormat::I24I8), storage) => {
                let packed = gl3 || es3 || extensions.gl_ext_packed_depth_stencil ||
                             extensions.gl_oes_packed_depth_stencil;
                packed && (storage == StorageKind::RenderBuffer || depth_textures)
            },

            _ => false,
        }
    }

    /// Returns true if the device can render stencil values to an image of this format.
    pub fn is_stencil_renderable<C: ?Sized>(&self, storage: StorageKind, context: &C) -> bool
        where C: CapabilitiesSource
    {
        let version = context.get_version();
        let extensions = context.get_extensions();

        match (*self, storage) {
            (TextureFormat::StencilFormat(StencilFormat::I8), StorageKind::RenderBuffer) => true,
            (TextureFormat::StencilFormat(_), StorageKind::RenderBuffer) => version.0 == Api::Gl,
            (TextureFormat::StencilFormat(StencilFormat::I8), StorageKind::Texture) => {
                version >= &Version(Api::Gl, 4, 4) || version >= &Version(Api::GlEs, 3, 2) ||
                extensions.gl_arb_texture_stencil8 || extensions.gl_oes_texture_stencil8
            },
            (TextureFormat::StencilFormat(_), StorageKind::Texture) => false,
            (TextureFormat::DepthStencilFormat(_), storage) => {
                self.is_depth_renderable(storage, context)
            },
            _ => false,
        }
    }
}
