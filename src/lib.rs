mod callbacks;
pub mod config;
pub mod draw;
pub mod engine;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, PointerEvent, ResizeObserver,
};

pub use crate::config::{ColorChoice, FireworksOptions, RangeOrValue};
use crate::draw::CanvasPainter;
use crate::engine::{rand::MathRandom, scheduler, Engine};

pub(crate) fn window() -> web_sys::Window {
    web_sys::window().expect("no global `window` exists")
}

fn document() -> web_sys::Document {
    window()
        .document()
        .expect("should have a document on window")
}

fn request_animation_frame(f: &Closure<dyn FnMut()>) -> i32 {
    window()
        .request_animation_frame(f.as_ref().unchecked_ref())
        .expect("should register `requestAnimationFrame` OK")
}

fn set_timeout(f: &Closure<dyn FnMut()>, delay: f64) -> Result<i32, JsValue> {
    window().set_timeout_with_callback_and_timeout_and_arguments_0(
        f.as_ref().unchecked_ref(),
        delay as i32,
    )
}

type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A fireworks animation mounted into a container element.
///
/// The handle owns every closure, timer and observer the widget wires
/// up; [`FireworksBackground::destroy`] tears all of it down again.
#[wasm_bindgen]
pub struct FireworksBackground {
    engine: Rc<RefCell<Engine>>,
    size: Rc<Cell<(f64, f64)>>,
    active: Rc<Cell<bool>>,
    raf_id: Rc<Cell<i32>>,
    pending_spawn: Rc<Cell<Option<i32>>>,
    container: HtmlElement,
    canvas: Option<HtmlCanvasElement>,
    observer: Option<ResizeObserver>,
    pointer_closure: Option<Closure<dyn FnMut(PointerEvent)>>,
    resize_closure: Option<Closure<dyn FnMut()>>,
    frame_closure: SharedClosure,
    spawn_closure: SharedClosure,
}

#[wasm_bindgen]
impl FireworksBackground {
    /// Mounts the widget into `container` and starts the animation.
    ///
    /// `options` is the JS options object; `undefined` or `null` selects
    /// the defaults. A host without 2d canvas support gets an inert
    /// handle back instead of an error.
    pub fn attach(
        container: HtmlElement,
        options: JsValue,
    ) -> Result<FireworksBackground, JsValue> {
        console_error_panic_hook::set_once();

        let options: FireworksOptions = if options.is_undefined() || options.is_null() {
            FireworksOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(JsValue::from)?
        };

        let canvas = document()
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;

        let style = canvas.style();
        style.set_property("position", "absolute")?;
        style.set_property("inset", "0")?;

        container.append_child(&canvas)?;

        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|object| object.dyn_into::<CanvasRenderingContext2d>().ok());

        let context = match context {
            Some(context) => context,
            None => {
                web_sys::console::warn_1(
                    &"fireworks-background: no 2d context available, staying idle".into(),
                );
                canvas.remove();
                return Ok(FireworksBackground::inert(container, options));
            }
        };

        let auto_play = options.auto_play;
        let engine = Rc::new(RefCell::new(Engine::new(options)));
        let size = Rc::new(Cell::new((0.0, 0.0)));
        let active = Rc::new(Cell::new(true));
        let raf_id = Rc::new(Cell::new(0));
        let pending_spawn: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        callbacks::on_resize(&container, &canvas, &context, &size)?;

        let resize_closure = {
            let container = container.clone();
            let canvas = canvas.clone();
            let context = context.clone();
            let size = size.clone();

            Closure::<dyn FnMut()>::new(move || {
                let _ = callbacks::on_resize(&container, &canvas, &context, &size);
            })
        };

        let observer = ResizeObserver::new(resize_closure.as_ref().unchecked_ref())?;
        observer.observe(&container);

        let pointer_closure = {
            let engine = engine.clone();
            let container = container.clone();

            Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                callbacks::on_pointer_down(&engine, &container, event);
            })
        };

        container.add_event_listener_with_callback(
            "pointerdown",
            pointer_closure.as_ref().unchecked_ref(),
        )?;

        let frame_closure: SharedClosure = Rc::new(RefCell::new(None));

        {
            let engine = engine.clone();
            let size = size.clone();
            let active = active.clone();
            let raf_handle = raf_id.clone();
            let context = context.clone();
            let frame_handle = frame_closure.clone();

            *frame_closure.borrow_mut() = Some(Closure::new(move || {
                if !active.get() {
                    return;
                }

                let (width, height) = size.get();
                let mut painter = CanvasPainter::new(&context);
                let _ = engine
                    .borrow_mut()
                    .tick(&mut MathRandom, &mut painter, width, height);

                raf_handle.set(request_animation_frame(
                    frame_handle.borrow().as_ref().unwrap(),
                ));
            }));

            raf_id.set(request_animation_frame(
                frame_closure.borrow().as_ref().unwrap(),
            ));
        }

        let spawn_closure: SharedClosure = Rc::new(RefCell::new(None));

        if auto_play {
            {
                let engine = engine.clone();
                let size = size.clone();
                let active = active.clone();
                let pending_spawn = pending_spawn.clone();
                let spawn_handle = spawn_closure.clone();

                *spawn_closure.borrow_mut() = Some(Closure::new(move || {
                    if !active.get() {
                        return;
                    }

                    let mut rng = MathRandom;
                    let (width, height) = size.get();

                    engine.borrow_mut().launch_random(&mut rng, width, height);

                    let population = engine.borrow().options().population;
                    let delay = scheduler::next_delay(&mut rng, population);

                    if let Ok(id) = set_timeout(spawn_handle.borrow().as_ref().unwrap(), delay) {
                        pending_spawn.set(Some(id));
                    }
                }));
            }

            // The first shell goes out immediately; the timer chain takes
            // over from there.
            let mut rng = MathRandom;
            let (width, height) = size.get();
            engine.borrow_mut().launch_random(&mut rng, width, height);

            let population = engine.borrow().options().population;
            let delay = scheduler::next_delay(&mut rng, population);
            let id = set_timeout(spawn_closure.borrow().as_ref().unwrap(), delay)?;
            pending_spawn.set(Some(id));
        }

        Ok(FireworksBackground {
            engine,
            size,
            active,
            raf_id,
            pending_spawn,
            container,
            canvas: Some(canvas),
            observer: Some(observer),
            pointer_closure: Some(pointer_closure),
            resize_closure: Some(resize_closure),
            frame_closure,
            spawn_closure,
        })
    }

    /// Launches one shell from the bottom edge at horizontal offset `x`,
    /// bursting at height `y`.
    pub fn launch(&self, x: f64, y: f64) {
        if !self.active.get() {
            return;
        }

        let (_, height) = self.size.get();
        self.engine
            .borrow_mut()
            .launch(&mut MathRandom, x, height, y);
    }

    /// Stops the animation and detaches everything the widget wired up.
    ///
    /// Safe to call more than once; after the first call no further
    /// updates or draws happen.
    pub fn destroy(&mut self) {
        self.active.set(false);

        if let Some(id) = self.pending_spawn.take() {
            window().clear_timeout_with_handle(id);
        }

        let _ = window().cancel_animation_frame(self.raf_id.get());

        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }

        if let Some(closure) = self.pointer_closure.take() {
            let _ = self.container.remove_event_listener_with_callback(
                "pointerdown",
                closure.as_ref().unchecked_ref(),
            );
        }

        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }

        self.frame_closure.borrow_mut().take();
        self.spawn_closure.borrow_mut().take();
        self.resize_closure.take();

        self.engine.borrow_mut().clear();
    }
}

impl FireworksBackground {
    fn inert(container: HtmlElement, options: FireworksOptions) -> FireworksBackground {
        FireworksBackground {
            engine: Rc::new(RefCell::new(Engine::new(options))),
            size: Rc::new(Cell::new((0.0, 0.0))),
            active: Rc::new(Cell::new(false)),
            raf_id: Rc::new(Cell::new(0)),
            pending_spawn: Rc::new(Cell::new(None)),
            container,
            canvas: None,
            observer: None,
            pointer_closure: None,
            resize_closure: None,
            frame_closure: Rc::new(RefCell::new(None)),
            spawn_closure: Rc::new(RefCell::new(None)),
        }
    }
}
