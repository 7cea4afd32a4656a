use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use flipmatch::Status;

pub fn status_text(status: &Status) -> String {
    match *status {
        Status::LevelPrompt { level } => {
            gettext("Match the cards! Level: {level}").replace("{level}", &level.to_string())
        }
        Status::Matched { pairs, level } => gettext("Correct match! Pairs: {pairs} / {level}")
            .replace("{pairs}", &pairs.to_string())
            .replace("{level}", &level.to_string()),
        Status::Mismatch => gettext("Wrong match, try again."),
        Status::LevelComplete { level } => {
            gettext("Congratulations! Level {level} complete.").replace("{level}", &level.to_string())
        }
        Status::TimedOut => gettext("⏰ Time's up! Game over."),
    }
}

pub fn timer_text(seconds: u32) -> String {
    gettext("Time: {seconds} s").replace("{seconds}", &seconds.to_string())
}

/// Status line, countdown and the start/restart controls.
pub struct Hud {
    status: gtk::Label,
    timer: gtk::Label,
    start_button: gtk::Button,
    restart_button: gtk::Button,
}

impl Hud {
    pub fn new() -> Self {
        let status = gtk::Label::builder()
            .label(gettext("Press Start to play"))
            .halign(gtk::Align::Center)
            .css_classes(vec!["status-label", "title-4"])
            .build();
        let timer = gtk::Label::builder()
            .label("")
            .halign(gtk::Align::Center)
            .css_classes(vec!["timer-label", "caption", "numeric"])
            .build();
        let start_button = gtk::Button::builder()
            .label(gettext("Start"))
            .halign(gtk::Align::Center)
            .css_classes(vec!["suggested-action", "pill"])
            .build();
        let restart_button = gtk::Button::builder()
            .label(gettext("Restart"))
            .halign(gtk::Align::Center)
            .css_classes(vec!["pill"])
            .visible(false)
            .build();
        Hud {
            status,
            timer,
            start_button,
            restart_button,
        }
    }

    pub fn status_label(&self) -> &gtk::Label {
        &self.status
    }

    pub fn timer_label(&self) -> &gtk::Label {
        &self.timer
    }

    pub fn start_button(&self) -> &gtk::Button {
        &self.start_button
    }

    pub fn restart_button(&self) -> &gtk::Button {
        &self.restart_button
    }

    pub fn set_status(&self, status: &Status) {
        self.status.set_text(&status_text(status));
        if *status == Status::TimedOut {
            self.status.add_css_class("error");
        } else {
            self.status.remove_css_class("error");
        }
    }

    pub fn set_timer(&self, seconds: u32) {
        self.timer.set_text(&timer_text(seconds));
    }

    pub fn set_restart_visible(&self, visible: bool) {
        self.restart_button.set_visible(visible);
    }
}
