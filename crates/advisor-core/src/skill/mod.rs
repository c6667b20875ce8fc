//! Skill payload validation.

pub mod validator;

pub use validator::{
    SkillValidator, validate, validate_size, validate_skill_input, validate_skill_output,
};
