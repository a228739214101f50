//! Argument reporting into the active log.

use tracing::info;

use crate::config::RunConfig;

const BANNER_TOP: &str = "----------Arguments-----------";
const BANNER_BOTTOM: &str = "------------------------------";

/// Assemble the report lines for a set of `(name, value)` pairs: the
/// opening banner, one `name = value` line per field in order, and the
/// closing banner. Always `fields.len() + 2` lines.
pub fn render_lines(fields: &[(&str, String)]) -> Vec<String> {
    let mut lines = Vec::with_capacity(fields.len() + 2);
    lines.push(BANNER_TOP.to_string());
    for (name, value) in fields {
        lines.push(format!("{} = {}", name, value));
    }
    lines.push(BANNER_BOTTOM.to_string());
    lines
}

/// Emit the effective run arguments at INFO severity, followed by a blank
/// separator line.
pub fn report(config: &RunConfig) {
    let fields = config.fields();
    for line in render_lines(&fields) {
        info!("{}", line);
    }
    info!("");
}
