use agricontract_domain::{
    profile_activity, profile_reviews, profile_stats, ActivityEntry, DashboardStat, Review, User,
};

use crate::forms::{Form, FormField};
use crate::intents::{Intent, ScreenAction};

use super::{back_to_dashboard, Outcome};

const DEFAULT_LOCATION: &str = "California, USA";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Location,
    Bio,
}

impl FormField for ProfileField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Location,
        Self::Bio,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Location => "Location",
            Self::Bio => "Bio",
        }
    }
}

#[derive(Debug)]
pub struct ProfileScreen {
    pub user: User,
    pub stats: Vec<DashboardStat>,
    pub activity: Vec<ActivityEntry>,
    pub reviews: Vec<Review>,
    /// Last saved values.
    pub saved: Form<ProfileField>,
    /// Working copy while editing.
    pub form: Form<ProfileField>,
    editing: bool,
}

impl ProfileScreen {
    pub fn new(user: User) -> Self {
        let saved = Form::new()
            .with(ProfileField::Name, user.name.clone())
            .with(ProfileField::Email, user.email.clone())
            .with(ProfileField::Phone, user.phone.clone())
            .with(ProfileField::Location, DEFAULT_LOCATION)
            .with(ProfileField::Bio, user.role.default_bio());
        Self {
            stats: profile_stats(user.role),
            activity: profile_activity(user.role),
            reviews: profile_reviews(user.role),
            form: saved.clone(),
            saved,
            user,
            editing: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        if self.editing {
            vec![ScreenAction::SaveProfile]
        } else {
            vec![ScreenAction::EditProfile, ScreenAction::ToggleTheme]
        }
    }

    /// Mean review rating.
    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|review| u32::from(review.rating)).sum();
        Some(total as f32 / self.reviews.len() as f32)
    }

    fn save(&mut self) -> Outcome {
        self.saved = self.form.clone();
        self.editing = false;
        tracing::info!(user = self.user.id.as_str(), "profile saved");
        Outcome::Updated
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match (self.editing, intent) {
            (false, Intent::Action(ScreenAction::EditProfile)) => {
                self.form = self.saved.clone();
                self.form.focus(ProfileField::Name);
                self.editing = true;
                Outcome::Updated
            }
            (false, Intent::Back) => back_to_dashboard(),
            (true, Intent::Action(ScreenAction::SaveProfile) | Intent::Submit) => self.save(),
            (true, Intent::Back) => {
                self.form = self.saved.clone();
                self.editing = false;
                Outcome::Updated
            }
            (true, Intent::Insert(ch)) => Outcome::changed(self.form.insert(ch)),
            (true, Intent::DeleteBackward) => Outcome::changed(self.form.backspace()),
            (true, Intent::FocusNext | Intent::SelectNext) => {
                self.form.focus_next();
                Outcome::Updated
            }
            (true, Intent::FocusPrevious | Intent::SelectPrevious) => {
                self.form.focus_previous();
                Outcome::Updated
            }
            _ => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{buyer, farmer};
    use agricontract_domain::Role;

    #[test]
    fn profile_starts_from_the_user_and_role_defaults() {
        let screen = ProfileScreen::new(farmer());
        assert!(!screen.is_editing());
        assert_eq!(screen.saved.value(ProfileField::Name), "John Smith");
        assert_eq!(screen.saved.value(ProfileField::Location), DEFAULT_LOCATION);
        assert_eq!(
            screen.saved.value(ProfileField::Bio),
            Role::Farmer.default_bio()
        );
        assert_eq!(screen.stats, profile_stats(Role::Farmer));
        assert!(screen.average_rating().is_some());
    }

    #[test]
    fn saving_keeps_edits_and_cancel_discards_them() {
        let mut screen = ProfileScreen::new(buyer());
        assert_eq!(screen.handle(Intent::Insert('x')), Outcome::Unchanged);

        screen.handle(Intent::Action(ScreenAction::EditProfile));
        assert!(screen.is_editing());
        screen.handle(Intent::FocusNext);
        screen.handle(Intent::FocusNext);
        screen.handle(Intent::DeleteBackward);
        screen.handle(Intent::Insert('1'));
        assert_eq!(screen.handle(Intent::Action(ScreenAction::SaveProfile)), Outcome::Updated);
        assert!(!screen.is_editing());
        assert_eq!(screen.saved.value(ProfileField::Phone), "+1234567891");

        screen.handle(Intent::Action(ScreenAction::EditProfile));
        screen.handle(Intent::Insert('!'));
        screen.handle(Intent::Back);
        assert!(!screen.is_editing());
        assert_eq!(screen.form.value(ProfileField::Name), "Sarah Buyer");
        assert_eq!(screen.user.name, "Sarah Buyer");
    }

    #[test]
    fn back_outside_editing_returns_to_dashboard() {
        let mut screen = ProfileScreen::new(buyer());
        assert_eq!(screen.handle(Intent::Back), back_to_dashboard());
    }
}
