use super::Serializer;
use crate::Capability;

static POSTGRESQL: Capability = Capability::POSTGRESQL;
static MYSQL: Capability = Capability::MYSQL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Mysql,
}

impl Serializer {
    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }

    /// The capabilities of the database this serializer targets.
    pub fn capability(&self) -> &'static Capability {
        match self.flavor {
            Flavor::Postgresql => &POSTGRESQL,
            Flavor::Mysql => &MYSQL,
        }
    }
}
