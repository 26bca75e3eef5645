use thiserror::Error;
use uuid::Uuid;

use super::dto::{RegisteredUser, UserForm, UserLevel};
use super::schedule::SchedulePolicy;
use crate::helpers::utils::avatar_url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("user {0} not found")]
    NotFound(String),
    #[error("user name must not be empty")]
    EmptyName,
}

/// In-memory register of kiosk users, newest first.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<RegisteredUser>,
}

impl UserDirectory {
    pub fn new(users: Vec<RegisteredUser>) -> Self {
        Self { users }
    }

    /// Directory preloaded with the four demo users.
    pub fn with_default_roster() -> Self {
        Self::new(default_roster())
    }

    pub fn list(&self) -> &[RegisteredUser] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&RegisteredUser> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RegisteredUser> {
        self.users.iter().find(|u| u.name == name)
    }

    pub fn create(&mut self, form: UserForm) -> Result<RegisteredUser, DirectoryError> {
        let name = Self::checked_name(&form.name)?;

        let user = RegisteredUser {
            id: Uuid::new_v4().to_string(),
            avatar: avatar_url(&name),
            name,
            dni: form.dni,
            user_level: form.user_level,
            uid: form.uid,
            schedule: form.schedule,
        };

        self.users.insert(0, user.clone());
        log::info!("Registered user {} ({})", user.name, user.id);

        Ok(user)
    }

    /// Replaces the editable fields of a user. Id and avatar are kept.
    pub fn update(&mut self, id: &str, form: UserForm) -> Result<RegisteredUser, DirectoryError> {
        let name = Self::checked_name(&form.name)?;

        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        user.name = name;
        user.dni = form.dni;
        user.user_level = form.user_level;
        user.uid = form.uid;
        user.schedule = form.schedule;

        log::info!("Updated user {} ({})", user.name, user.id);

        Ok(user.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<RegisteredUser, DirectoryError> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        let removed = self.users.remove(index);
        log::info!("Deleted user {} ({})", removed.name, removed.id);

        Ok(removed)
    }

    fn checked_name(name: &str) -> Result<String, DirectoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DirectoryError::EmptyName);
        }
        Ok(name.to_string())
    }
}

fn seed_user(
    id: &str,
    name: &str,
    dni: &str,
    user_level: UserLevel,
    uid: &str,
    schedule: &str,
) -> RegisteredUser {
    RegisteredUser {
        id: id.to_string(),
        name: name.to_string(),
        dni: dni.to_string(),
        user_level,
        uid: uid.to_string(),
        schedule: SchedulePolicy::parse(schedule),
        avatar: avatar_url(name),
    }
}

pub fn default_roster() -> Vec<RegisteredUser> {
    vec![
        seed_user(
            "1",
            "Ana Torres",
            "12345678A",
            UserLevel::Administrador,
            "A1B2C3D4",
            "Acceso Total",
        ),
        seed_user(
            "2",
            "Carlos Gomez",
            "87654321B",
            UserLevel::Usuario,
            "B2C3D4E5",
            "Diurno (8:00-18:00)",
        ),
        seed_user(
            "3",
            "Sofia Rossi",
            "11223344C",
            UserLevel::Usuario,
            "C3D4E5F6",
            "Diurno (8:00-18:00)",
        ),
        seed_user(
            "4",
            "Luis Fernandez",
            "55667788D",
            UserLevel::Visitante,
            "D4E5F6G7",
            "Temporal",
        ),
    ]
}
