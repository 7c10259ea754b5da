// ABOUTME: Well-known permission names shared by commands and config files.
// ABOUTME: Plain string constants, kept apart from the store type.

/// Allows the player to use chat commands.
pub const CHAT: &str = "chat";

/// Allows the player to use cheats that have no global impact and don't
/// endanger the stability of the game.
///
/// Intended for servers where players focus on building rather than mining.
pub const CHEAT: &str = "cheat";

/// Marks an action that requires no permission. Always granted, never stored.
pub const NO_PERMISSION: &str = "";

/// Allows the player to edit settings of other users, e.g. granting permissions.
pub const USER_MANAGEMENT: &str = "userManagement";

/// Allows the player to perform server maintenance tasks like stopping the server.
pub const SERVER_MANAGEMENT: &str = "serverManagement";

/// Allows the player to use debug commands not intended for a real server.
pub const DEBUG: &str = "debug";

/// The grantable well-known names.
pub const WELL_KNOWN: [&str; 5] = [CHAT, CHEAT, USER_MANAGEMENT, SERVER_MANAGEMENT, DEBUG];

/// Check if a name is one of the well-known permissions.
pub fn is_well_known(name: &str) -> bool {
    WELL_KNOWN.contains(&name)
}

/// Check if a name is the "no permission required" marker.
pub fn is_no_permission(name: &str) -> bool {
    name == NO_PERMISSION
}
