//! Isotropic continuum damage laws evaluated at the integration points of a
//! finite element mesh.
//!
//! A model owns the history of every integration point. `evaluate` fills the
//! stress and its derivatives for the current strains without touching the
//! history, `update` commits the history once a load step is accepted.
pub mod constraint;
pub mod damage_law;
pub mod equivalent_strain;
pub mod error;
pub mod gradient_damage;
pub mod history;
pub mod interfaces;
pub mod ip_loop;
pub mod linear_elasticity;
pub mod local_damage;
pub mod parameters;
pub mod stress_strain;

#[cfg(feature = "python")]
mod python;

pub use constraint::Constraint;
pub use error::{DamageError, DamageResult};
pub use gradient_damage::{GradientDamage, GradientDamageIp};
pub use interfaces::{ConstitutiveModel, QDim, QValues, Q};
pub use ip_loop::IpLoop;
pub use local_damage::LocalDamage;
pub use parameters::DamageParameters;
