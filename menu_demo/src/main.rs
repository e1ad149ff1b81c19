//! Menu scene demo application
//!
//! Builds a main menu scene and a terminal whose screen shows a second
//! menu rendered to texture, all against headless renderer collaborators.
//!
//! Usage: `menu_demo [interface.toml|interface.ron]`

use std::sync::Arc;

use menu_scene::foundation::logging::{self, error, info};
use menu_scene::prelude::*;
use menu_scene::render::{MaterialInstanceKey, MemoryTextureDb};
use thiserror::Error;

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("menu scene '{0}' is not registered")]
    MissingScene(String),
}

/// Movie stand-in that logs the viewports it receives
struct LoggingMovie {
    name: &'static str,
}

impl UiMovie for LoggingMovie {
    fn set_viewport(&mut self, viewport: Viewport) {
        info!(
            "Movie '{}' viewport: {}x{} at ({}, {}) in {}x{}",
            self.name,
            viewport.width,
            viewport.height,
            viewport.left,
            viewport.top,
            viewport.buffer_width,
            viewport.buffer_height
        );
    }
}

fn load_interface_settings() -> InterfaceSettings {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading interface settings from {}", path);
            InterfaceSettings::load_or_default(path)
        }
        None => {
            info!("No settings file given, using defaults");
            InterfaceSettings::default()
        }
    }
}

fn build_terminal(textures: &MemoryTextureDb) -> NodeRef {
    let terminal = Node::fade_group("Terminal", 0.0);
    let screen = Node::geometry("TerminalScreen", MaterialInstanceKey(1));
    let casing = Node::geometry("TerminalCasing", MaterialInstanceKey(2));
    terminal.attach_child(screen);
    terminal.attach_child(casing);
    textures.register_material(MaterialInstanceKey(1), 1);
    textures.register_material(MaterialInstanceKey(2), 1);
    terminal
}

fn run() -> Result<(), DemoError> {
    let interface = load_interface_settings();
    let manager = Arc::new(SceneManager::new());
    let renderer = HeadlessRenderer::new(1920, 1080);

    let main_menu = Scene::new(
        "MainMenu",
        renderer.services(manager.clone(), interface.clone()),
        None,
        0.0,
    );
    main_menu.write().attach_object(build_terminal(&renderer.textures));
    main_menu.write().set_clear_color(ClearColor::new(0.02, 0.02, 0.05, 1.0));

    let world_root = main_menu.read().root().clone();
    let terminal_menu = Scene::with_root(
        "TerminalMenu",
        world_root,
        renderer.services(manager.clone(), interface),
        None,
        0.0,
    );
    {
        let mut terminal_menu = terminal_menu.write();
        terminal_menu.setup_menu_to_texture(1024, 768)?;
        let retargeted = terminal_menu.setup_menu_to_texture_on_object("TerminalScreen")?;
        info!("Menu texture shown on {} geometry node(s)", retargeted);
    }
    info!("{} render target(s) completed", renderer.textures.complete_pending());

    let scene = manager
        .get_by_name("MainMenu")
        .ok_or_else(|| DemoError::MissingScene("MainMenu".to_string()))?;
    {
        let scene = scene.read();
        let mut movie = LoggingMovie { name: "MainMenu" };
        scene.set_viewport(&mut movie, &RenderArea { left: 0.1, top: 0.1, right: 0.9, bottom: 0.9 });

        let cursor = Vec2::new(1440.0, 270.0);
        let point = scene.world_point_from_screen_point(cursor, 5.0, false);
        info!("Cursor {:?} projects to world point {:?}", cursor, point);
    }

    manager.set_active_all(true);
    manager.for_each_scene(|scene| {
        let scene = scene.read();
        info!("Scene '{}' active: {}", scene.name(), scene.is_active());
    });

    drop(scene);
    drop(terminal_menu);
    drop(main_menu);
    manager.shutdown();
    Ok(())
}

fn main() {
    logging::init();

    if let Err(error) = run() {
        error!("Menu demo failed: {}", error);
        std::process::exit(1);
    }
}
