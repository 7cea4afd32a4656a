use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gettextrs::gettext;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let body = gettext(
        "Flip two cards at a time and find every pair.\n\
Clearing the board moves you to a bigger deck with less time.\n\
When the clock runs out, restart from the first level.",
    );
    let heading = gettext("How to Play");
    let dialog = adw::AlertDialog::new(Some(heading.as_str()), Some(body.as_str()));
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Flipmatch")
        .application_icon(super::app::APP_ID)
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("Find the pairs before the clock runs out."))
        .build();
    dialog.add_legal_section("Flipmatch", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
