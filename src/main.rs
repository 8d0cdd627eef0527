//! Folio entry point
//!
//! Wires the navigation controller and reveal scheduler to the page on the
//! web; runs a headless walkthrough natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, MouseEvent, PageTransitionEvent};

    use folio::consts::*;
    use folio::platform::web::{WebPage, WebViewportObserver};
    use folio::render;
    use folio::settings::RevealKind;
    use folio::{NavigationController, RevealScheduler, SectionRegistry, SiteSettings};

    type Nav = NavigationController<WebPage>;
    type Reveal = RevealScheduler<WebViewportObserver>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Folio starting...");

        let settings = SiteSettings::load();
        let registry = settings.registry().unwrap_or_else(|e| {
            log::warn!("{}, falling back to default sections", e);
            SectionRegistry::default()
        });

        let Some(page) = WebPage::new() else {
            log::error!("No document, nothing to render");
            return;
        };
        let document = page.document().clone();

        render::build_nav(&document, &registry, &settings);
        render::stamp_footer_year(&document);

        // Navigation
        let nav: Rc<RefCell<Nav>> = Rc::new(RefCell::new(NavigationController::new(registry, page)));
        {
            let mut n = nav.borrow_mut();
            let doc = document.clone();
            n.subscribe(move |state| render::apply_menu(&doc, state));
            render::apply_menu(&document, &n.state());
        }

        // Reveals
        let reveal: Rc<RefCell<Reveal>> = Rc::new_cyclic(|weak: &Weak<RefCell<Reveal>>| {
            let weak = weak.clone();
            let observer = WebViewportObserver::new(&document, move |batch| {
                let Some(reveal) = weak.upgrade() else {
                    return;
                };
                let Ok(mut r) = reveal.try_borrow_mut() else {
                    log::warn!("reveal scheduler busy, dropped {} notifications", batch.len());
                    return;
                };
                r.handle_all(batch);
            });
            RefCell::new(RevealScheduler::new(observer))
        });
        {
            let mut r = reveal.borrow_mut();
            let doc = document.clone();
            r.subscribe(move |id| render::apply_reveal(&doc, id));
            register_targets(&document, &settings, &mut r);
        }

        setup_click_handler(&document, nav);
        setup_teardown(&document, settings, reveal);

        log::info!("Folio running!");
    }

    /// Register every `[data-reveal]` element. Elements that already carry the
    /// revealed class (restored from the back/forward cache) stay revealed.
    fn register_targets(document: &web_sys::Document, settings: &SiteSettings, r: &mut Reveal) {
        for (id, kind) in render::reveal_targets(document, settings) {
            if render::has_revealed(document, &id) {
                r.reveal_now(&id);
                continue;
            }
            match kind {
                RevealKind::InView(threshold) => {
                    r.register(&id, threshold);
                }
                RevealKind::Mount => {
                    r.reveal_now(&id);
                }
            }
        }
        log::info!(
            "Tracking {} elements ({} already revealed)",
            r.observing_count() + r.revealed_count(),
            r.revealed_count()
        );
    }

    /// One delegated click listener for the menu toggle and every nav target
    fn setup_click_handler(document: &web_sys::Document, nav: Rc<RefCell<Nav>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };

            if let Ok(Some(_)) = target.closest(&format!("[{}]", MENU_TOGGLE_ATTR)) {
                nav.borrow_mut().toggle_menu();
                return;
            }

            if let Ok(Some(link)) = target.closest(&format!("[{}]", NAV_ATTR)) {
                if let Some(section_id) = link.get_attribute(NAV_ATTR) {
                    // Anchors like href="#projects" must not jump instantly
                    event.prevent_default();
                    nav.borrow_mut().navigate_to(&section_id);
                }
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Release viewport observation when the page goes away, and observe
    /// again if it comes back from the back/forward cache
    fn setup_teardown(document: &web_sys::Document, settings: SiteSettings, reveal: Rc<RefCell<Reveal>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let reveal = reveal.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Ok(mut r) = reveal.try_borrow_mut() {
                    r.teardown();
                }
            });
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                log::info!("Page restored from cache, observing again");
                match reveal.try_borrow_mut() {
                    Ok(mut r) => register_targets(&document, &settings, &mut r),
                    Err(_) => log::warn!("reveal scheduler busy, reveals not resumed"),
                }
            });
            let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Folio (native) starting...");
    log::info!("The page itself needs a browser - run with `trunk serve` for the web version");

    println!("\nRunning headless walkthrough...");
    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use folio::platform::Intersection;
    use folio::platform::headless::{HeadlessObserver, HeadlessPage};
    use folio::{NavOutcome, NavigationController, RevealScheduler, SiteSettings, Threshold};

    let settings = SiteSettings::load();
    let registry = match settings.registry() {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    let page = HeadlessPage::with_elements(registry.ids().map(str::to_string).collect::<Vec<_>>());
    let mut nav = NavigationController::new(registry, page);

    nav.toggle_menu();
    let outcome = nav.navigate_to("projects");
    println!("navigate_to(projects) -> {:?}", outcome);
    let outcome = nav.navigate_to("careers");
    println!("navigate_to(careers)  -> {:?}", outcome);
    println!("scrolls issued: {:?}", nav.host().scrolls());
    if outcome != NavOutcome::UnknownSection || nav.menu_open() {
        log::error!("navigation walkthrough diverged");
    }

    let mut reveal = RevealScheduler::new(HeadlessObserver::new());
    reveal.subscribe(|id| println!("reveal -> #{}", id));
    reveal.register("card-1", Threshold::new(0.4));
    for ratio in [0.5, 0.0, 0.6] {
        reveal.handle(&Intersection::new("card-1", ratio));
    }
    println!(
        "card-1 revealed: {} (observing {} elements)",
        reveal.is_revealed("card-1"),
        reveal.observer().observed_count()
    );
    reveal.teardown();

    println!("✓ Walkthrough finished");
}
