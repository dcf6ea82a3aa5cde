//! Common constants used throughout create-sparc.

/// Supported manifest file names, probed in this order.
pub const MANIFEST_FILES: [&str; 3] = ["template.json", "template.yml", "template.yaml"];

/// Subdirectory holding the files of a legacy template.
pub const LEGACY_FILES_DIR: &str = "files";

/// Extensions whose content is rendered; everything else is copied verbatim.
pub const TEXT_EXTENSIONS: [&str; 15] = [
    "txt", "md", "py", "js", "ts", "html", "css", "json", "yaml", "yml", "toml", "cfg", "ini",
    "sh", "rs",
];

/// Directory and script name of the post-generation hook inside a template.
pub const HOOKS_DIR: &str = "hooks";
pub const POST_GEN_HOOK: &str = "post_gen_project";

/// Template used when the caller does not name one.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Templates root used when neither the settings file nor the CLI names one.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Per-user settings location, relative to the home directory.
pub const SETTINGS_DIR: &str = ".create-sparc";
pub const SETTINGS_FILE: &str = "config.json";
