//! Input vocabulary the frontend sends to the controller.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenAction {
    GetStarted,
    ToggleTheme,
    ChooseFarmer,
    ChooseBuyer,
    ToggleSignUp,
    QuickDemo,
    Logout,
    OpenProducts,
    OpenContracts,
    OpenProfile,
    OpenListProduct,
    ToggleOfferForm,
    AcceptOffer,
    ToggleAgreement,
    BackToNegotiation,
    Sign,
    ProceedToPayment,
    Download,
    EditProfile,
    SaveProfile,
    ReturnToDashboard,
}

impl ScreenAction {
    pub const ALL: [Self; 21] = [
        Self::GetStarted,
        Self::ToggleTheme,
        Self::ChooseFarmer,
        Self::ChooseBuyer,
        Self::ToggleSignUp,
        Self::QuickDemo,
        Self::Logout,
        Self::OpenProducts,
        Self::OpenContracts,
        Self::OpenProfile,
        Self::OpenListProduct,
        Self::ToggleOfferForm,
        Self::AcceptOffer,
        Self::ToggleAgreement,
        Self::BackToNegotiation,
        Self::Sign,
        Self::ProceedToPayment,
        Self::Download,
        Self::EditProfile,
        Self::SaveProfile,
        Self::ReturnToDashboard,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::GetStarted => "get started",
            Self::ToggleTheme => "theme",
            Self::ChooseFarmer => "farmer",
            Self::ChooseBuyer => "buyer",
            Self::ToggleSignUp => "login/sign up",
            Self::QuickDemo => "quick demo",
            Self::Logout => "logout",
            Self::OpenProducts => "products",
            Self::OpenContracts => "contracts",
            Self::OpenProfile => "profile",
            Self::OpenListProduct => "list product",
            Self::ToggleOfferForm => "offer form",
            Self::AcceptOffer => "accept offer",
            Self::ToggleAgreement => "agree",
            Self::BackToNegotiation => "back to chat",
            Self::Sign => "sign",
            Self::ProceedToPayment => "pay advance",
            Self::Download => "download",
            Self::EditProfile => "edit",
            Self::SaveProfile => "save",
            Self::ReturnToDashboard => "dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Quit,
    Back,
    FocusNext,
    FocusPrevious,
    SelectNext,
    SelectPrevious,
    Increase,
    Decrease,
    Insert(char),
    DeleteBackward,
    Submit,
    Action(ScreenAction),
}
