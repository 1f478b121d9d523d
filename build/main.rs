use std::env;
use std::fs::File;
use std::path::Path;

use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

fn main() {
    let dest = env::var("OUT_DIR").unwrap();
    let mut file = File::create(Path::new(&dest).join("gl_bindings.rs")).unwrap();

    // the core 4.5 registry already carries every framebuffer entry point, the extensions
    // only add the EXT/ARB fallbacks for older drivers
    Registry::new(Api::Gl, (4, 5), Profile::Core, Fallbacks::All, [
        "GL_ARB_framebuffer_object",
        "GL_EXT_framebuffer_object",
        "GL_EXT_framebuffer_blit",
    ]).write_bindings(StructGenerator, &mut file).unwrap();

    println!("cargo:rerun-if-changed=build/main.rs");
}
