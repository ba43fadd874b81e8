// Shared prompt constants for provider-level calls.
// Mood-specific prompts live in mood/prompts.rs.

/// System message for the startup warm-up call.
pub const WARM_UP_SYSTEM: &str = "You are a helpful assistant.";

/// User message for the startup warm-up call.
pub const WARM_UP_USER: &str = "Hello";
