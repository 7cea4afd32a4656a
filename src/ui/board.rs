use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

pub const TILE_GAP: i32 = 6;
const HIDDEN_FACE: &str = "?";

type SelectHandler = Rc<RefCell<Option<Box<dyn Fn(usize)>>>>;

/// The card grid. Each slot is a button whose face is drawn from `faces`:
/// `None` draws the hidden face, `Some(glyph)` the revealed symbol.
pub struct BoardView {
    container: gtk::Box,
    buttons: Vec<gtk::Button>,
    faces: Rc<RefCell<Vec<Option<String>>>>,
    on_select: SelectHandler,
}

impl BoardView {
    pub fn new() -> Self {
        let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
        container.add_css_class("board-container");
        container.set_hexpand(true);
        container.set_vexpand(true);
        BoardView {
            container,
            buttons: Vec::new(),
            faces: Rc::new(RefCell::new(Vec::new())),
            on_select: Rc::new(RefCell::new(None)),
        }
    }

    pub fn widget(&self) -> &gtk::Box {
        &self.container
    }

    pub fn connect_select(&self, handler: impl Fn(usize) + 'static) {
        *self.on_select.borrow_mut() = Some(Box::new(handler));
    }

    pub fn set_face(&self, index: usize, glyph: Option<&str>) {
        if let Some(face) = self.faces.borrow_mut().get_mut(index) {
            *face = glyph.map(str::to_string);
        }
        if let Some(button) = self.buttons.get(index) {
            if glyph.is_some() {
                button.add_css_class("active");
            } else {
                button.remove_css_class("active");
            }
            if let Some(child) = button.child() {
                child.queue_draw();
            }
        }
    }

    pub fn rebuild(&mut self, deck_size: usize, per_row: usize) {
        while let Some(child) = self.container.first_child() {
            self.container.remove(&child);
        }
        *self.faces.borrow_mut() = vec![None; deck_size];

        let grid = gtk::Grid::new();
        grid.add_css_class("card-board");
        grid.set_row_spacing(TILE_GAP as u32);
        grid.set_column_spacing(TILE_GAP as u32);
        grid.set_halign(gtk::Align::Fill);
        grid.set_valign(gtk::Align::Fill);
        grid.set_hexpand(true);
        grid.set_vexpand(true);

        let per_row = per_row.max(1);
        let mut buttons = Vec::with_capacity(deck_size);
        for index in 0..deck_size {
            let button = self.build_card(index);
            let aspect_frame = gtk::AspectFrame::builder()
                .ratio(1.0)
                .obey_child(false)
                .halign(gtk::Align::Fill)
                .valign(gtk::Align::Fill)
                .hexpand(true)
                .vexpand(true)
                .build();
            aspect_frame.set_child(Some(&button));

            let x = (index % per_row) as i32;
            let y = (index / per_row) as i32;
            grid.attach(&aspect_frame, x, y, 1, 1);
            buttons.push(button);
        }
        self.buttons = buttons;

        let rows = deck_size.div_ceil(per_row).max(1);
        let grid_frame = gtk::AspectFrame::new(0.5, 0.5, per_row as f32 / rows as f32, false);
        grid_frame.set_hexpand(true);
        grid_frame.set_vexpand(true);
        grid_frame.set_child(Some(&grid));
        self.container.append(&grid_frame);
    }

    fn build_card(&self, index: usize) -> gtk::Button {
        let button = gtk::Button::builder().css_classes(vec!["card"]).build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let drawing_area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .build();
        drawing_area.add_css_class("card-label");

        let faces = self.faces.clone();
        drawing_area.set_draw_func(move |area, cr, width, height| {
            let faces = faces.borrow();
            let Some(face) = faces.get(index) else {
                return;
            };
            let is_hidden = face.is_none();
            let text = face.as_deref().unwrap_or(HIDDEN_FACE);

            let min_dim = width.min(height) as f64;
            let font_size = if is_hidden { min_dim * 0.34 } else { min_dim * 0.40 };

            cr.set_antialias(cairo::Antialias::Best);

            let layout = pangocairo::functions::create_layout(cr);
            let mut font_desc = pango::FontDescription::new();
            if is_hidden {
                font_desc.set_family("Cantarell, Noto Sans, sans");
                font_desc.set_weight(pango::Weight::Bold);
            } else {
                font_desc.set_family("Noto Color Emoji, Apple Color Emoji, Segoe UI Emoji, sans");
            }
            font_desc.set_size((font_size * pango::SCALE as f64) as i32);
            layout.set_font_description(Some(&font_desc));
            layout.set_text(text);

            let fg = area.style_context().color();
            cr.set_source_rgba(
                fg.red() as f64,
                fg.green() as f64,
                fg.blue() as f64,
                fg.alpha() as f64,
            );

            let (text_width, text_height) = layout.pixel_size();
            cr.move_to(
                (width as f64 - text_width as f64) / 2.0,
                (height as f64 - text_height as f64) / 2.0,
            );
            pangocairo::functions::show_layout(cr, &layout);
        });
        button.set_child(Some(&drawing_area));

        let on_select = self.on_select.clone();
        button.connect_clicked(move |_| {
            if let Some(handler) = on_select.borrow().as_ref() {
                handler(index);
            }
        });
        button
    }
}
