pub mod pipeline;
pub mod score;
pub mod use_case;
