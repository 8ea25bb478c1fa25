//! The uniform self-description contract shared by every plugin wrapper.

/// Static self-description for a plugin wrapper.
///
/// Each integration crate implements this on a marker type. The strings are
/// documentation aids surfaced by the `redkit info` subcommand, not
/// protocol.
pub trait PluginInfo {
    /// Short name the plugin is addressed by.
    const NAME: &'static str;

    /// Maintainer attribution text.
    fn authors() -> &'static str {
        "AUTHOR(S):\n  RedKit Contributors <maintainers@redkit.dev>\n"
    }

    /// Usage dump describing the plugin's calling convention.
    fn usage() -> &'static str;
}
