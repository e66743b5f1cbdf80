//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# conrelay configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[transport]
# segment_capacity = 4096     # 64-1048576, bytes per direction

[flow]
# high_water = 400            # row that pauses the hosted program
# poll_interval_ms = 200      # 10-10000
# tolerance = 10              # 0-1000 rows
# pause_input = "\u0013"      # XOFF
# resume_input = "\u0011"     # XON

[surface]
# columns = 120               # 20-1000
# rows = 1000                 # must exceed high_water + tolerance
# visible_rows = 25
# drain_grace_ms = 250        # 0-10000

[input]
# echo = true                 # also CONRELAY_ECHO=true|false

[remote]
# program = ""                # empty: conrelay next to this executable

[logging]
# level = "info"              # trace, debug, info, warn, error
# file_logging = true
# directory = ""              # empty: system temp directory
"##
    .to_string()
}
