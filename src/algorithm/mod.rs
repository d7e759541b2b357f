/// Generation loop orchestration
pub mod executor;
/// Weighted collapse and one-hop constraint propagation
pub mod propagation;
/// Entropy-ranked cell selection and seeded random choices
pub mod selection;
