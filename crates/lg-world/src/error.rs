use thiserror::Error;

use crate::Entity;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("{0} is not alive")]
    Dead(Entity),

    #[error("{entity} has no {component} component")]
    MissingComponent {
        entity:    Entity,
        component: &'static str,
    },
}

pub type WorldResult<T> = Result<T, WorldError>;
