fn main() {
    glib_build_tools::compile_resources(
        &["resources"],
        "resources/launcher.gresource.xml",
        "launcher.gresource",
    );
}
