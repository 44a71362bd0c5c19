//! Screen navigation for the meter front end.
//!
//! This is presentation state only; ride, tariff and history data live in
//! [`meter_core::MeterSession`].

use meter_core::RecordId;

/// The tab-bar screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Meter,
    History,
    Settings,
    Tariffs,
    EditTariffs,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Meter => "Meter",
            Screen::History => "History",
            Screen::Settings => "Settings",
            Screen::Tariffs => "Tariffs",
            Screen::EditTariffs => "Edit tariffs",
        }
    }
}

/// What a delete confirmation would remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Record(RecordId),
    AllHistory,
}

/// Dialogs drawn over the current screen. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Payment,
    CustomTips,
    AddTariff,
    ConfirmDelete(DeleteTarget),
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub screen: Screen,
    pub modal: Option<Modal>,
    /// The live map replaces the meter screen while a ride runs.
    pub show_map: bool,
    pub waze_style: bool,
}

impl ViewState {
    pub fn navigate(
        &mut self,
        screen: Screen,
    ) {
        self.screen = screen;
        self.modal = None;
    }

    pub fn on_ride_started(&mut self) {
        self.screen = Screen::Meter;
        self.show_map = true;
    }

    /// Stopping hides the map and opens the payment dialog.
    pub fn on_ride_stopped(&mut self) {
        self.show_map = false;
        self.modal = Some(Modal::Payment);
    }

    pub fn open(
        &mut self,
        modal: Modal,
    ) {
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// The pending delete, if the confirmation dialog is open.
    pub fn pending_delete(&self) -> Option<DeleteTarget> {
        match self.modal {
            Some(Modal::ConfirmDelete(target)) => Some(target),
            _ => None,
        }
    }

    pub fn is_paying(&self) -> bool {
        self.modal == Some(Modal::Payment)
    }
}
