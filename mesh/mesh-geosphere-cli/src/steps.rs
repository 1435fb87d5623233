//! Parsing of `walk` steps.

use mesh_geosphere::SphereCommand;

/// Parse one step: `+`/`subdivide`, `-`/`coarsen`, `reset`, or `=N`.
pub fn parse_step(step: &str) -> Result<SphereCommand, String> {
    match step {
        "+" | "subdivide" => Ok(SphereCommand::Subdivide),
        "-" | "coarsen" => Ok(SphereCommand::Coarsen),
        "reset" => Ok(SphereCommand::Reset),
        _ => {
            let level = step
                .strip_prefix('=')
                .ok_or_else(|| format!("unknown step '{step}' (expected +, -, =N or reset)"))?;
            level
                .parse()
                .map(SphereCommand::SetLevel)
                .map_err(|e| format!("invalid level in '{step}': {e}"))
        }
    }
}
