use agricontract_domain::{DomainError, Role, User};

use crate::forms::{FieldKind, Form, FormField};
use crate::intents::{Intent, ScreenAction};
use crate::navigator::NavEvent;

use super::{Outcome, ScreenContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Email,
    Password,
    Phone,
}

impl FormField for LoginField {
    const ALL: &'static [Self] = &[Self::Name, Self::Email, Self::Password, Self::Phone];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Phone => "Phone",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Password => FieldKind::Secret,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    Login,
    SignUp,
}

impl LoginMode {
    pub fn fields(self) -> &'static [LoginField] {
        match self {
            Self::Login => &[LoginField::Email, LoginField::Password],
            Self::SignUp => LoginField::ALL,
        }
    }
}

#[derive(Debug)]
pub struct LoginScreen {
    pub role: Role,
    pub mode: LoginMode,
    pub form: Form<LoginField>,
}

impl LoginScreen {
    pub fn new(role: Role) -> Self {
        let mut form = Form::new();
        form.focus(LoginField::Email);
        Self {
            role,
            mode: LoginMode::Login,
            form,
        }
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        vec![ScreenAction::ToggleSignUp, ScreenAction::QuickDemo]
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.form.value(LoginField::Email).trim().is_empty() {
            return Err(DomainError::missing("email"));
        }
        if self.form.value(LoginField::Password).is_empty() {
            return Err(DomainError::missing("password"));
        }
        Ok(())
    }

    fn move_focus(&mut self, forward: bool) {
        let visible = self.mode.fields();
        let current = visible
            .iter()
            .position(|field| *field == self.form.focused())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % visible.len()
        } else {
            (current + visible.len() - 1) % visible.len()
        };
        self.form.focus(visible[next]);
    }

    fn submit(&mut self, ctx: &mut ScreenContext<'_>) -> Outcome {
        if let Err(error) = self.validate() {
            return Outcome::rejected(error);
        }
        let (name, phone) = match self.mode {
            LoginMode::Login => ("", ""),
            LoginMode::SignUp => (
                self.form.value(LoginField::Name),
                self.form.value(LoginField::Phone),
            ),
        };
        let user = User::from_login(
            ctx.rng,
            self.role,
            name,
            self.form.value(LoginField::Email),
            phone,
        );
        tracing::info!(role = self.role.label(), user = user.id.as_str(), "signed in");
        Outcome::Navigate(NavEvent::Login {
            role: self.role,
            user,
        })
    }

    pub fn handle(&mut self, intent: Intent, ctx: &mut ScreenContext<'_>) -> Outcome {
        match intent {
            Intent::Insert(ch) => Outcome::changed(self.form.insert(ch)),
            Intent::DeleteBackward => Outcome::changed(self.form.backspace()),
            Intent::FocusNext | Intent::SelectNext => {
                self.move_focus(true);
                Outcome::Updated
            }
            Intent::FocusPrevious | Intent::SelectPrevious => {
                self.move_focus(false);
                Outcome::Updated
            }
            Intent::Submit => self.submit(ctx),
            Intent::Action(ScreenAction::ToggleSignUp) => {
                self.mode = match self.mode {
                    LoginMode::Login => LoginMode::SignUp,
                    LoginMode::SignUp => LoginMode::Login,
                };
                self.form.focus(self.mode.fields()[0]);
                Outcome::Updated
            }
            Intent::Action(ScreenAction::QuickDemo) => {
                let user = User::quick_demo(ctx.rng, self.role);
                tracing::info!(role = self.role.label(), "quick demo login");
                Outcome::Navigate(NavEvent::Login {
                    role: self.role,
                    user,
                })
            }
            Intent::Back => Outcome::Navigate(NavEvent::BackToRoleSelection),
            _ => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{now, rng};
    use crate::simulation::test_support::services;

    fn type_into(screen: &mut LoginScreen, ctx: &mut ScreenContext<'_>, text: &str) {
        for ch in text.chars() {
            screen.handle(Intent::Insert(ch), ctx);
        }
    }

    #[test]
    fn login_requires_email_and_password() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = LoginScreen::new(Role::Farmer);
        assert_eq!(
            screen.handle(Intent::Submit, &mut ctx),
            Outcome::Rejected("email is required".to_owned())
        );
        type_into(&mut screen, &mut ctx, "a@farm.com");
        assert!(!screen.can_submit());
        screen.handle(Intent::FocusNext, &mut ctx);
        type_into(&mut screen, &mut ctx, "pw");

        let Outcome::Navigate(NavEvent::Login { role, user }) =
            screen.handle(Intent::Submit, &mut ctx)
        else {
            panic!("expected login navigation");
        };
        assert_eq!(role, Role::Farmer);
        assert_eq!(user.email, "a@farm.com");
        assert_eq!(user.name, "Demo User");
        assert_eq!(user.phone, "+1234567890");
        assert_eq!(user.id.as_str().len(), 9);
    }

    #[test]
    fn sign_up_uses_name_and_phone() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = LoginScreen::new(Role::Buyer);
        screen.handle(Intent::Action(ScreenAction::ToggleSignUp), &mut ctx);
        assert_eq!(screen.form.focused(), LoginField::Name);
        for text in ["Priya", "priya@mill.in", "secret", "+919800000000"] {
            type_into(&mut screen, &mut ctx, text);
            screen.handle(Intent::FocusNext, &mut ctx);
        }

        let Outcome::Navigate(NavEvent::Login { user, .. }) =
            screen.handle(Intent::Submit, &mut ctx)
        else {
            panic!("expected login navigation");
        };
        assert_eq!(user.name, "Priya");
        assert_eq!(user.phone, "+919800000000");
        assert_eq!(user.role, Role::Buyer);
    }

    #[test]
    fn quick_demo_and_back() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = LoginScreen::new(Role::Buyer);
        let Outcome::Navigate(NavEvent::Login { user, .. }) =
            screen.handle(Intent::Action(ScreenAction::QuickDemo), &mut ctx)
        else {
            panic!("expected quick demo login");
        };
        assert_eq!(user.email, "sarah@company.com");
        assert_eq!(
            screen.handle(Intent::Back, &mut ctx),
            Outcome::Navigate(NavEvent::BackToRoleSelection)
        );
    }
}
