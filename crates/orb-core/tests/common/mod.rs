// Shared helpers for orb-core integration tests.

#![allow(dead_code)]

use orb_core::{Composite, Paint, Surface2d};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Cmd {
    Resize(u32, u32),
    Composite(Composite),
    Fill(Paint),
    Rect,
    Circle { x: f32, y: f32, r: f32 },
}

/// Surface that records every call into a shared log.
pub struct RecordingSurface {
    pub log: Rc<RefCell<Vec<Cmd>>>,
    width: u32,
    height: u32,
}

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<Vec<Cmd>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                log: log.clone(),
                width: 0,
                height: 0,
            },
            log,
        )
    }

    pub fn boxed() -> (Box<dyn Surface2d>, Rc<RefCell<Vec<Cmd>>>) {
        let (s, log) = Self::new();
        (Box::new(s), log)
    }
}

impl Surface2d for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.log.borrow_mut().push(Cmd::Resize(width, height));
    }
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    fn set_composite(&mut self, op: Composite) {
        self.log.borrow_mut().push(Cmd::Composite(op));
    }
    fn set_fill(&mut self, paint: &Paint) {
        self.log.borrow_mut().push(Cmd::Fill(*paint));
    }
    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
        self.log.borrow_mut().push(Cmd::Rect);
    }
    fn fill_circle(&mut self, x: f32, y: f32, r: f32) {
        self.log.borrow_mut().push(Cmd::Circle { x, y, r });
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
