use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::error::ShapeResult;
use crate::event::CanvasEvent;
use crate::input::InputHandler;
use crate::registry::ShapeArgs;
use crate::renderer::Renderer;

const SWITCH: &str = "switch";
const BULB: &str = "bulb";

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ShapesApp {
    config: CanvasConfig,
    #[serde(skip)]
    canvas: Canvas,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    renderer: Renderer,
    /// Last message pushed by the canvas status sink.
    #[serde(skip)]
    status: Rc<RefCell<String>>,
}

impl Default for ShapesApp {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl ShapesApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<Self>(storage, eframe::APP_KEY))
            .map(|app| app.config)
            .filter(|config| match config.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Ignoring stored configuration: {err}");
                    false
                }
            })
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let status = Rc::new(RefCell::new(String::new()));
        let mut canvas = Canvas::with_builtins(config.clone());
        let sink = Rc::clone(&status);
        canvas.register_status_sink(Box::new(move |message: &str| {
            message.clone_into(&mut sink.borrow_mut());
        }));
        if let Err(err) = populate_demo(&mut canvas) {
            log::error!("Could not build the demo circuit: {err}");
        }
        let input = InputHandler::new(canvas.viewport().screen_rect);
        Self {
            config,
            canvas,
            input,
            renderer: Renderer::new(),
            status,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let center = self.canvas.viewport().screen_rect.center();
            if ui.button("Zoom In").clicked() {
                self.canvas.zoom_at(center, true);
            }
            if ui.button("Zoom Out").clicked() {
                self.canvas.zoom_at(center, false);
            }
            if ui.button("Flip Switch").clicked() {
                if let Err(err) = self.canvas.toggle(SWITCH) {
                    log::warn!("{err}");
                }
            }
            let selected = self.canvas.selected_tags();
            if ui
                .add_enabled(!selected.is_empty(), egui::Button::new("Delete Selected"))
                .clicked()
            {
                for tag in selected {
                    if let Err(err) = self.canvas.destroy(&tag) {
                        log::warn!("{err}");
                    }
                }
            }
            ui.separator();
            ui.label(format!("Zoom: {:.2}", self.canvas.zoom_level()));
        });
    }

    /// The bulb follows the switch.
    fn drain_events(&mut self) {
        let mut switch_state = None;
        while let Some(envelope) = self.canvas.poll_event() {
            match envelope.event.tag() {
                Some(tag) => log::debug!("Canvas event {} on {tag}: {:?}", envelope.id, envelope.event),
                None => log::debug!("Canvas event {}: {:?}", envelope.id, envelope.event),
            }
            if let CanvasEvent::Toggled { tag, on } = &envelope.event {
                if tag == SWITCH {
                    switch_state = Some(*on);
                }
            }
        }
        let Some(on) = switch_state else {
            return;
        };
        if let Err(err) = self.canvas.set_state(BULB, on) {
            log::warn!("{err}");
        }
    }
}

impl eframe::App for ShapesApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.borrow().as_str());
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;
                self.canvas.set_screen_rect(rect);
                self.input.set_canvas_rect(rect);

                for event in self.input.process_input(ctx) {
                    self.canvas.handle_input(&event);
                }
                self.drain_events();
                if self.canvas.tick() {
                    ctx.request_repaint();
                }

                self.renderer
                    .paint(self.canvas.surface(), self.canvas.viewport(), &painter);
            });
    }
}

/// A switch driving a bulb through an AND gate, plus one of every other gate.
fn populate_demo(canvas: &mut Canvas) -> ShapeResult<()> {
    canvas.create(
        "GGraphPaper",
        ShapeArgs::new("paper").at(0.0, 0.0).size(2000.0, 1500.0),
    )?;

    canvas.create("GToggleSwitch", ShapeArgs::new(SWITCH).at(80.0, 190.0))?;
    canvas.create("GAndGate", ShapeArgs::new("and").at(260.0, 160.0))?;
    canvas.create("GLightBulb", ShapeArgs::new(BULB).at(480.0, 260.0))?;

    let gates = [
        "GBufferGate",
        "GNotGate",
        "GNandGate",
        "GOrGate",
        "GNorGate",
        "GXOrGate",
        "GXNorGate",
    ];
    for (i, kind) in gates.into_iter().enumerate() {
        let x = 80.0 + 150.0 * i as f32;
        canvas.create(kind, ShapeArgs::new("").at(x, 420.0))?;
    }

    let tags: Vec<String> = canvas
        .objects()
        .filter(|object| !object.flags().background)
        .map(|object| object.tag().to_owned())
        .collect();
    for tag in tags {
        canvas.add_mouse_bindings(&tag)?;
    }

    wire(canvas, (SWITCH, "output"), ("and", "input_1"))?;
    wire(canvas, ("and", "output"), (BULB, "input"))?;
    Ok(())
}

fn wire(canvas: &mut Canvas, from: (&str, &str), to: (&str, &str)) -> ShapeResult<()> {
    let a = canvas.node(from.0, from.1)?;
    let b = canvas.node(to.0, to.1)?;
    let start = canvas.node_center(a).unwrap_or_default();
    let end = canvas.node_center(b).unwrap_or_default();
    let name = format!("{}_{}__to__{}_{}", from.0, from.1, to.0, to.1);
    canvas.create("GWire", ShapeArgs::new(name.as_str()).endpoints(start, end))?;
    canvas.connect(&name, a, b)?;
    canvas.update_wire(&name)?;
    Ok(())
}
