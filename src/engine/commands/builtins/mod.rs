pub mod io;
pub mod math;
pub mod text;

use crate::engine::commands::registry::Registry;
use crate::engine::error::Result;

/// Helper to register all built-in commands at once
pub fn register_builtins(registry: &mut Registry) -> Result<()> {
    // Math
    registry.register::<math::AddNumber>()?;
    registry.register::<math::SubtractNumber>()?;
    registry.register::<math::MultiplyNumber>()?;
    registry.register::<math::DivideNumber>()?;

    // Text
    registry.register::<text::GetSubstring>()?;
    registry.register::<text::JoinText>()?;

    // IO
    registry.register::<io::WriteHost>()?;
    Ok(())
}
