use crate::backend::Backend;
use crate::data::session::Session;
use crate::error::BackendError;

use super::{User, UserLoginData, UserSignupData, USER_RECORD_NAME};

pub trait UserDbExt {
    fn users(&self) -> Vec<User>;

    /// The user the session record points at, if any.
    fn current_user(&self) -> Option<User>;

    /// Exact, case-sensitive credential scan. A match becomes the current
    /// session; no match leaves the session untouched and answers `None`.
    fn login(&mut self, login: UserLoginData) -> Result<Option<User>, BackendError>;

    fn logout(&mut self) -> Result<(), BackendError>;

    /// Appends a new user and logs them in. Usernames are unique; a repeat
    /// fails without touching the user list or the session.
    fn register_user(&mut self, signup: UserSignupData) -> Result<User, BackendError>;
}

impl UserDbExt for Backend {
    fn users(&self) -> Vec<User> {
        self.store.load(USER_RECORD_NAME, vec![])
    }

    fn current_user(&self) -> Option<User> {
        let id = self.session().current_user_id?;
        self.users().into_iter().find(|u| u.id == id)
    }

    fn login(&mut self, login: UserLoginData) -> Result<Option<User>, BackendError> {
        let found = self
            .users()
            .into_iter()
            .find(|u| u.username == login.username && u.password == login.password);

        let user = match found {
            Some(user) => user,
            None => return Ok(None),
        };

        self.set_session(Session {
            current_user_id: Some(user.id.clone()),
        })?;

        tracing::info!("logged in user {}", user.id);
        Ok(Some(user))
    }

    fn logout(&mut self) -> Result<(), BackendError> {
        self.set_session(Session::default())?;
        Ok(())
    }

    fn register_user(&mut self, signup: UserSignupData) -> Result<User, BackendError> {
        let mut users = self.users();

        if users.iter().any(|u| u.username == signup.username) {
            return Err(BackendError::UsernameTaken(signup.username));
        }

        let role = signup.role.unwrap_or_default();
        let user = User {
            id: self.fresh_id(&role.to_string()),
            username: signup.username,
            name: signup.name,
            role,
            password: signup.password,
        };

        users.push(user.clone());
        self.store.save(USER_RECORD_NAME, &users)?;
        self.set_session(Session {
            current_user_id: Some(user.id.clone()),
        })?;

        tracing::info!("created {} user {}", user.role, user.id);
        Ok(user)
    }
}

///////////////////////
//       TESTS
///////////////////////

#[cfg(test)]
mod user_operations {
    use crate::backend::{Backend, RandomIds};
    use crate::error::BackendError;
    use crate::role::Role;
    use crate::store::Store;

    use super::{UserDbExt, UserLoginData, UserSignupData};

    fn test_backend() -> Backend {
        Backend::new(Store::in_memory(), Box::new(RandomIds))
    }

    fn example_signup_data(user: impl AsRef<str>) -> UserSignupData {
        UserSignupData {
            username: user.as_ref().to_string(),
            name: user.as_ref().to_string(),
            password: user.as_ref().replace("o", "0").replace("e", "3"),
            role: None,
        }
    }

    #[test]
    fn register_creates_student_and_logs_in() {
        let mut backend = test_backend();

        let user = backend
            .register_user(example_signup_data("morgan"))
            .expect("unable to register user");

        assert_eq!(user.role, Role::Student);
        assert!(user.id.starts_with("student_"));
        assert_eq!(backend.session().current_user_id, Some(user.id.clone()));
        assert_eq!(backend.current_user().map(|u| u.id), Some(user.id));
    }

    #[test]
    fn register_admin_uses_role_prefix() {
        let mut backend = test_backend();

        let mut signup = example_signup_data("prof_finch");
        signup.role = Some(Role::Admin);
        let user = backend
            .register_user(signup)
            .expect("unable to register admin");

        assert_eq!(user.role, Role::Admin);
        assert!(user.role.can_manage());
        assert!(user.id.starts_with("admin_"));
    }

    #[test]
    fn duplicate_username_is_rejected_without_side_effects() {
        let mut backend = test_backend();

        backend
            .register_user(example_signup_data("morgan"))
            .expect("unable to register user");
        backend.logout().expect("unable to log out");

        let err = backend
            .register_user(example_signup_data("morgan"))
            .expect_err("duplicate username must fail");
        match err {
            BackendError::UsernameTaken(name) => assert_eq!(name, "morgan"),
            other => panic!("unexpected error: {}", other),
        }

        assert_eq!(backend.users().len(), 1);
        assert_eq!(backend.session().current_user_id, None);
    }

    #[test]
    fn login_matches_exact_credentials_only() {
        let mut backend = test_backend();

        let registered = backend
            .register_user(example_signup_data("morgan"))
            .expect("unable to register user");
        backend.logout().expect("unable to log out");

        let wrong = backend
            .login(UserLoginData {
                username: "morgan".to_string(),
                password: "not-the-password".to_string(),
            })
            .expect("login must not error");
        assert!(wrong.is_none());
        assert_eq!(backend.session().current_user_id, None);

        let user = backend
            .login(UserLoginData {
                username: "morgan".to_string(),
                password: "m0rgan".to_string(),
            })
            .expect("login must not error")
            .expect("valid credentials must match");
        assert_eq!(user.id, registered.id);
        assert_eq!(backend.session().current_user_id, Some(user.id));
    }

    #[test]
    fn logout_is_idempotent() {
        let mut backend = test_backend();

        backend
            .register_user(example_signup_data("morgan"))
            .expect("unable to register user");

        backend.logout().expect("unable to log out");
        backend.logout().expect("second logout must also succeed");
        assert_eq!(backend.session().current_user_id, None);
    }
}
