//! Portfolio FX entry point
//!
//! Wires the effect components to the page on the web, or runs a short
//! headless simulation natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::anyhow;
    use glam::Vec2;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{
        Document, Element, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        PageTransitionEvent, PointerEvent, ScrollBehavior, ScrollToOptions, WheelEvent, Window,
    };

    use portfolio_fx::app::SectionView;
    use portfolio_fx::platform::web::{AnimationFrames, listen, set_style};
    use portfolio_fx::renderer::CanvasSurface;
    use portfolio_fx::sim::{CursorFollower, PageDirection, RevealAction, RevealKind, Tilt};
    use portfolio_fx::{AppContext, Settings};

    type SharedApp = Rc<RefCell<AppContext>>;

    fn query_all(root: &Document, selector: &str) -> Vec<Element> {
        let Ok(list) = root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query(root: &Document, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn viewport(window: &Window) -> Vec2 {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Vec2::new(dim(window.inner_width()) as f32, dim(window.inner_height()) as f32)
    }

    /// Match the canvas backing size to its layout size
    fn sync_canvas_size(canvas: &HtmlCanvasElement) -> (f32, f32) {
        let width = canvas.offset_width().max(0) as u32;
        let height = canvas.offset_height().max(0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width as f32, height as f32)
    }

    fn rect_origin(element: &Element) -> Vec2 {
        let rect = element.get_bounding_client_rect();
        Vec2::new(rect.left() as f32, rect.top() as f32)
    }

    fn smooth_scroll_window(top: f64) {
        if let Some(window) = web_sys::window() {
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }

    pub fn init() -> anyhow::Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("no document"))?;

        let settings = Settings::load();
        let seed = settings
            .particles
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);

        let sections = query_all(&document, ".section");
        let section_ids = sections.iter().map(|s| s.id()).collect();
        let app = Rc::new(RefCell::new(AppContext::new(
            settings,
            viewport(&window),
            section_ids,
            seed,
        )));
        log::info!("Portfolio FX initialized with seed: {}", seed);

        let canvas = document
            .get_element_by_id("heroCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        match &canvas {
            Some(canvas) => {
                let (w, h) = sync_canvas_size(canvas);
                app.borrow_mut().init_particles(w, h);
            }
            None => log::debug!("No #heroCanvas, particle field skipped"),
        }

        let reveal_elements = setup_reveals(&document, &app);
        setup_scroll(&window, &document, sections, reveal_elements, app.clone());
        setup_pointer(&document, canvas.clone(), app.clone());
        setup_resize(&window, canvas.clone(), app.clone());
        setup_navigation(&document, app.clone());
        setup_gallery(&window, &document, app.clone());
        setup_filter(&document, app.clone());
        setup_cursor(&document, app.clone());
        setup_tilt(&document, app.clone());
        start_render_loop(&window, &document, canvas, app);

        log::info!("Portfolio FX running");
        Ok(())
    }

    fn apply_sections(
        view: &SectionView,
        sections: &[Element],
        contents: &[Option<Element>],
        dots: &[Element],
    ) {
        for (i, frame) in view.frames.iter().enumerate() {
            if let Some(section) = sections.get(i) {
                set_style(section, "transform", &frame.css_transform());
            }
            if let Some(Some(content)) = contents.get(i) {
                set_style(content, "opacity", &frame.content_opacity.to_string());
            }
        }
        for (dot, active) in dots.iter().zip(&view.nav_dots) {
            let _ = dot
                .class_list()
                .toggle_with_force("nav-dot--active", *active);
        }
    }

    /// Collect fade/slide elements and skill bars; returns them in tracker order
    fn setup_reveals(document: &Document, app: &SharedApp) -> Vec<Element> {
        if !app.borrow().settings().features.reveal {
            return Vec::new();
        }
        let mut elements = Vec::new();
        let mut kinds = Vec::new();
        for el in query_all(document, "[class*=\"fade-in\"], [class*=\"slide-in\"]") {
            if let Some(kind) = RevealKind::from_class_list(&el.class_name()) {
                kinds.push(kind);
                elements.push(el);
            }
        }
        for bar in query_all(document, ".skill-item__progress") {
            if let Some(level) = bar.get_attribute("data-skill") {
                kinds.push(RevealKind::skill_bar(&level));
                elements.push(bar);
            }
        }
        app.borrow_mut().init_reveals(kinds);
        elements
    }

    fn apply_reveals(app: &mut AppContext, elements: &[Element]) {
        let revealed = app.update_reveals(|i| {
            let rect = elements.get(i)?.get_bounding_client_rect();
            Some((rect.top(), rect.height()))
        });
        for (index, action) in revealed {
            let Some(el) = elements.get(index) else {
                continue;
            };
            match action {
                RevealAction::AddClass(class) => {
                    let _ = el.class_list().add_1(class);
                }
                RevealAction::SetWidth(width) => set_style(el, "width", &width),
            }
        }
    }

    fn setup_scroll(
        window: &Window,
        document: &Document,
        sections: Vec<Element>,
        reveal_elements: Vec<Element>,
        app: SharedApp,
    ) {
        let contents: Vec<Option<Element>> = sections
            .iter()
            .map(|s| s.query_selector(".section__content").ok().flatten())
            .collect();
        let dots = query_all(document, ".nav-dot");
        let nav_links: Vec<(Element, String)> = query_all(document, ".nav__link")
            .into_iter()
            .map(|link| {
                let href = link.get_attribute("href").unwrap_or_default();
                (link, href)
            })
            .collect();
        let parallax: Vec<(Element, Option<f64>)> = query_all(document, "[data-parallax]")
            .into_iter()
            .map(|el| {
                let speed = el
                    .get_attribute("data-parallax")
                    .and_then(|v| v.parse::<f64>().ok());
                (el, speed)
            })
            .collect();

        let update = move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let mut app = app.borrow_mut();
            app.on_scroll(window.scroll_y().unwrap_or(0.0));
            if let Some(view) = app.section_view() {
                apply_sections(&view, &sections, &contents, &dots);
            }
            if app.active_nav_id().is_some() {
                for (link, href) in &nav_links {
                    let _ = link
                        .class_list()
                        .toggle_with_force("nav__link--active", app.is_active_link(href));
                }
            }
            for (el, speed) in &parallax {
                if let Some(offset) = app.parallax(*speed) {
                    set_style(el, "transform", &format!("translateY({}px)", offset));
                }
            }
            apply_reveals(&mut app, &reveal_elements);
        };
        update();
        listen(window, "scroll", move |_: Event| update());
    }

    fn setup_pointer(document: &Document, canvas: Option<HtmlCanvasElement>, app: SharedApp) {
        listen(document, "mousemove", move |event: MouseEvent| {
            let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            let origin = canvas.as_ref().map(|c| rect_origin(c)).unwrap_or(Vec2::ZERO);
            app.borrow_mut().on_pointer_move(client, origin);
        });
    }

    fn setup_resize(window: &Window, canvas: Option<HtmlCanvasElement>, app: SharedApp) {
        listen(window, "resize", move |_: Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (w, h) = canvas.as_ref().map(sync_canvas_size).unwrap_or((0.0, 0.0));
            app.borrow_mut().on_resize(viewport(&window), w, h);
        });
    }

    fn setup_navigation(document: &Document, app: SharedApp) {
        for (index, dot) in query_all(document, ".nav-dot").into_iter().enumerate() {
            let app = app.clone();
            listen(&dot, "click", move |event: MouseEvent| {
                if let Some(top) = app.borrow().nav_target(index) {
                    event.prevent_default();
                    smooth_scroll_window(top);
                }
            });
        }

        for link in query_all(document, "a[href^=\"#\"]") {
            let app = app.clone();
            let href = link.get_attribute("href").unwrap_or_default();
            listen(&link, "click", move |event: MouseEvent| {
                if let Some(top) = app.borrow().anchor_target(&href) {
                    event.prevent_default();
                    smooth_scroll_window(top);
                }
            });
        }
    }

    struct GalleryDom {
        scroller: Element,
        track: Option<Element>,
        thumb: Option<Element>,
    }

    impl GalleryDom {
        fn sync_metrics(&self, app: &mut AppContext) {
            let track_width = self.track.as_ref().map(|t| t.client_width()).unwrap_or(0);
            if let Some(gallery) = app.gallery_mut() {
                gallery.set_metrics(
                    self.scroller.scroll_width() as f64,
                    self.scroller.client_width() as f64,
                    track_width as f64,
                );
                gallery.set_scroll_left(self.scroller.scroll_left() as f64);
            }
        }

        fn apply(&self, app: &AppContext, scroll_left: Option<f64>) {
            let Some(gallery) = app.gallery() else {
                return;
            };
            if let Some(x) = scroll_left {
                self.scroller.set_scroll_left(x as _);
            }
            if let Some(thumb) = &self.thumb {
                let geometry = gallery.thumb();
                set_style(thumb, "width", &format!("{}%", geometry.width_pct));
                set_style(thumb, "left", &format!("{}%", geometry.position_pct));
            }
        }
    }

    fn setup_gallery(window: &Window, document: &Document, app: SharedApp) {
        if app.borrow().gallery().is_none() {
            return;
        }
        let Some(scroller) = query(document, ".projects__gallery") else {
            log::debug!("No gallery on page");
            return;
        };
        let dom = Rc::new(GalleryDom {
            scroller: scroller.clone(),
            track: query(document, ".gallery__track"),
            thumb: query(document, ".gallery__thumb"),
        });
        {
            let mut app = app.borrow_mut();
            dom.sync_metrics(&mut app);
            dom.apply(&app, None);
        }

        {
            let (app, dom) = (app.clone(), dom.clone());
            listen(&scroller, "pointerdown", move |event: PointerEvent| {
                let mut app = app.borrow_mut();
                dom.sync_metrics(&mut app);
                let started = app
                    .gallery_mut()
                    .is_some_and(|g| g.begin_content_drag(event.client_x() as f64));
                if started {
                    let _ = dom.scroller.class_list().add_1("gallery--dragging");
                }
            });
        }

        if let Some(thumb) = dom.thumb.clone() {
            let (app, dom) = (app.clone(), dom.clone());
            listen(&thumb, "pointerdown", move |event: PointerEvent| {
                event.stop_propagation();
                event.prevent_default();
                let mut app = app.borrow_mut();
                dom.sync_metrics(&mut app);
                if let Some(gallery) = app.gallery_mut() {
                    gallery.begin_track_drag(event.client_x() as f64);
                }
            });
        }

        {
            let (app, dom) = (app.clone(), dom.clone());
            listen(window, "pointermove", move |event: PointerEvent| {
                let mut app = app.borrow_mut();
                let moved = app
                    .gallery_mut()
                    .and_then(|g| g.drag_to(event.client_x() as f64));
                if moved.is_some() {
                    dom.apply(&app, moved);
                }
            });
        }

        {
            let (app, dom) = (app.clone(), dom.clone());
            listen(window, "pointerup", move |_: PointerEvent| {
                if let Some(gallery) = app.borrow_mut().gallery_mut() {
                    gallery.end_drag();
                }
                let _ = dom.scroller.class_list().remove_1("gallery--dragging");
            });
        }

        {
            let (app, dom) = (app.clone(), dom.clone());
            listen(&scroller, "wheel", move |event: WheelEvent| {
                let mut app = app.borrow_mut();
                dom.sync_metrics(&mut app);
                let scrolled = app
                    .gallery_mut()
                    .and_then(|g| g.wheel(event.delta_x(), event.delta_y()));
                if scrolled.is_some() {
                    event.prevent_default();
                    dom.apply(&app, scrolled);
                }
            });
        }

        {
            let (app, dom) = (app.clone(), dom.clone());
            listen(&scroller, "scroll", move |_: Event| {
                let mut app = app.borrow_mut();
                dom.sync_metrics(&mut app);
                dom.apply(&app, None);
            });
        }

        {
            let (app, dom) = (app.clone(), dom.clone());
            listen(&scroller, "keydown", move |event: KeyboardEvent| {
                let Some(direction) = PageDirection::from_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                let mut app = app.borrow_mut();
                dom.sync_metrics(&mut app);
                if let Some(left) = app.gallery_mut().map(|g| g.page(direction)) {
                    let options = ScrollToOptions::new();
                    options.set_left(left);
                    options.set_behavior(ScrollBehavior::Smooth);
                    dom.scroller.scroll_to_with_scroll_to_options(&options);
                }
            });
        }
    }

    fn setup_filter(document: &Document, app: SharedApp) {
        if app.borrow().project_filter().is_none() {
            return;
        }
        let buttons: Rc<Vec<(Element, String)>> = Rc::new(
            query_all(document, ".filter-btn")
                .into_iter()
                .filter_map(|button| {
                    let filter = button.get_attribute("data-filter")?;
                    Some((button, filter))
                })
                .collect(),
        );
        let cards: Rc<Vec<(Element, Option<String>)>> = Rc::new(
            query_all(document, ".project-card")
                .into_iter()
                .map(|card| {
                    let category = card.get_attribute("data-category");
                    (card, category)
                })
                .collect(),
        );

        for (button, filter) in buttons.iter() {
            let (app, buttons, cards, filter) =
                (app.clone(), buttons.clone(), cards.clone(), filter.clone());
            listen(button, "click", move |_: MouseEvent| {
                let mut app = app.borrow_mut();
                let Some(selected) = app.select_filter(&filter) else {
                    return;
                };
                let shown = selected.visibility(cards.iter().map(|(_, c)| c.as_deref()));
                for ((card, _), show) in cards.iter().zip(shown) {
                    let _ = card
                        .class_list()
                        .toggle_with_force("project-card--hidden", !show);
                }
                for (button, button_filter) in buttons.iter() {
                    let _ = button
                        .class_list()
                        .toggle_with_force("filter-btn--active", selected.is_active(button_filter));
                }
            });
        }
    }

    fn apply_cursor_classes(cursor_el: &Element, cursor: &CursorFollower) {
        for (class, on) in cursor.classes() {
            let _ = cursor_el.class_list().toggle_with_force(class, on);
        }
    }

    fn setup_cursor(document: &Document, app: SharedApp) {
        if app.borrow().cursor().is_none() {
            return;
        }
        let Some(cursor_el) = query(document, ".cursor") else {
            return;
        };
        set_style(&cursor_el, "opacity", "1");

        for (event, pressed) in [("mousedown", true), ("mouseup", false)] {
            let (app, cursor_el) = (app.clone(), cursor_el.clone());
            listen(document, event, move |_: MouseEvent| {
                if let Some(cursor) = app.borrow_mut().cursor_mut() {
                    cursor.set_pressed(pressed);
                    apply_cursor_classes(&cursor_el, cursor);
                }
            });
        }

        for target in query_all(document, "a, button, .project-card, .skill-item") {
            for (event, hovering) in [("mouseenter", true), ("mouseleave", false)] {
                let (app, cursor_el) = (app.clone(), cursor_el.clone());
                listen(&target, event, move |_: MouseEvent| {
                    if let Some(cursor) = app.borrow_mut().cursor_mut() {
                        cursor.set_hovering(hovering);
                        apply_cursor_classes(&cursor_el, cursor);
                    }
                });
            }
        }
    }

    fn setup_tilt(document: &Document, app: SharedApp) {
        if !app.borrow().settings().effective_tilt() {
            return;
        }
        for element in query_all(document, ".hero__visual, .about__image") {
            {
                let (app, target) = (app.clone(), element.clone());
                listen(&element, "mousemove", move |event: MouseEvent| {
                    let rect = target.get_bounding_client_rect();
                    let local = Vec2::new(
                        event.client_x() as f32 - rect.left() as f32,
                        event.client_y() as f32 - rect.top() as f32,
                    );
                    let size = Vec2::new(rect.width() as f32, rect.height() as f32);
                    if let Some(tilt) = app.borrow().tilt(local, size) {
                        set_style(&target, "transform", &tilt.css_transform());
                    }
                });
            }
            let target = element.clone();
            listen(&element, "mouseleave", move |_: MouseEvent| {
                set_style(&target, "transform", &Tilt::FLAT.css_transform());
            });
        }
    }

    fn start_render_loop(
        window: &Window,
        document: &Document,
        canvas: Option<HtmlCanvasElement>,
        app: SharedApp,
    ) {
        let mut surface = canvas.as_ref().and_then(CanvasSurface::from_canvas);
        let dot = query(document, ".cursor__dot");
        let circle = query(document, ".cursor__circle");

        let frames = AnimationFrames::start(move |_frame| {
            let mut app = app.borrow_mut();
            app.step();
            if let Some(surface) = surface.as_mut() {
                app.render(surface);
            }
            if let Some(cursor) = app.cursor() {
                if let Some(dot) = &dot {
                    set_style(dot, "transform", &cursor.dot_transform());
                }
                if let Some(circle) = &circle {
                    set_style(circle, "transform", &cursor.circle_transform());
                }
            }
        });

        // Pages kept in the back/forward cache come back through `pageshow`
        {
            let frames = frames.clone();
            listen(window, "pagehide", move |_: PageTransitionEvent| frames.stop());
        }
        listen(window, "pageshow", move |event: PageTransitionEvent| {
            if event.persisted() {
                frames.resume();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Portfolio FX starting...");

    if let Err(e) = wasm_app::init() {
        log::error!("Error initializing portfolio effects: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use portfolio_fx::platform::RenderLoop;
    use portfolio_fx::renderer::RecordingSurface;
    use portfolio_fx::{AppContext, Settings};

    env_logger::init();
    log::info!("Portfolio FX (native) starting...");
    log::info!("Native mode runs a headless simulation - use `trunk serve` for the web version");

    let settings = Settings::load();
    let seed = settings.particles.seed.unwrap_or(42);
    let section_ids = ["hero", "about", "projects", "contact"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut app = AppContext::new(settings, Vec2::new(1280.0, 800.0), section_ids, seed);
    app.init_particles(1280.0, 800.0);

    let mut surface = RecordingSurface::new();
    let mut render_loop = RenderLoop::new();
    let ticks = render_loop.run_ticks(300, |frame| {
        // Sweep the pointer across the canvas
        let x = (frame as f32 * 4.0) % 1280.0;
        app.on_pointer_move(Vec2::new(x, 400.0), Vec2::ZERO);
        app.on_scroll(frame as f64 * 12.0);
        surface.reset();
        app.frame(&mut surface);
    });

    println!("\nRan {} frames", ticks);
    println!(
        "Last frame: {} particles, {} links",
        surface.circle_count(),
        surface.line_count()
    );
    if let Some(view) = app.section_view() {
        let active = view.nav_dots.iter().position(|a| *a);
        println!("Scroll {:.0}: active section {:?}", app.scroll(), active);
        for (i, frame) in view.frames.iter().enumerate() {
            println!(
                "  section {}: translate {:.1}vh, opacity {:.3}",
                i, frame.translate_vh, frame.content_opacity
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
