mod palette;

use std::path::{Path, PathBuf};
use std::process;

use alpha_lang::runtime::value::format_number;
use alpha_lang::{Direction, ErrorKind, FrameInput, GameObject, Session, SessionConfig, Shape};
use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui::{self, Color32, RichText};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const CANVAS_SIZE: (f32, f32) = (800.0, 600.0);

const DEMO_SCRIPT: &str = "// write alpha code here
object.create(square, player);
object.color(player, blue);

for(i=0;i<4;i=i+1){
    object.create(circle, coin-i);
    object.color(coin-i, gold);
}
object.move(coin-0, 200, 80);
object.move(coin-1, 300, 160);
object.move(coin-2, 400, 240);
object.move(coin-3, 500, 320);

object.create(triangle, wall);
object.move(wall, 600, 400);
object.collidable(wall, false);
";

// ─── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Alpha script to load at startup
    script: Option<PathBuf>,

    /// JSON file overriding object defaults, nudge speed or pulse parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run this many frames without opening a window, then print the result
    #[arg(long)]
    ticks: Option<u32>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };
    debug!(?config, "config loaded");

    let source = match &cli.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            info!(path = %path.display(), "script loaded");
            text
        }
        None => DEMO_SCRIPT.to_string(),
    };

    if let Some(ticks) = cli.ticks {
        run_headless(&source, config, ticks);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 800.0]),
        ..Default::default()
    };
    let app = App::new(source, config);
    eframe::run_native("Alpha", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
}

fn load_config(path: &Path) -> Result<SessionConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

// ─── Headless ─────────────────────────────────────────────────────────────────

fn run_headless(source: &str, config: SessionConfig, ticks: u32) {
    let mut session = Session::with_config(config);
    session.parse(source);
    for _ in 0..ticks {
        session.tick(&FrameInput::default());
    }

    println!("diagnostics: {}", session.diagnostics().len());
    for e in session.diagnostics() {
        println!("  {e}");
    }

    println!("objects: {}", session.scene().len());
    for (name, obj) in session.scene().iter() {
        let marker = if session.selection() == Some(name) { "*" } else { " " };
        println!("{marker} {name}: {}", describe(obj));
    }

    println!("variables: {}", session.variables().len());
    for (name, value) in session.variables().iter() {
        println!("  {name} = {}", format_number(value));
    }
}

fn describe(obj: &GameObject) -> String {
    format!(
        "{} at ({}, {}) size={:.2} color={} opacity={:.2} collidable={}",
        obj.shape.as_str(),
        format_number(obj.x),
        format_number(obj.y),
        obj.size,
        obj.color,
        obj.opacity,
        obj.collidable,
    )
}

// ─── App state ────────────────────────────────────────────────────────────────

#[derive(PartialEq)]
enum Tab { Console, Scene, Variables, Canvas }

struct App {
    source: String,
    session: Session,
    tab: Tab,
    /// Canvas click from the previous frame, consumed by the next tick.
    pending_click: Option<(f64, f64)>,
}

impl App {
    fn new(source: String, config: SessionConfig) -> Self {
        let mut session = Session::with_config(config);
        session.parse(&source);
        Self { source, session, tab: Tab::Canvas, pending_click: None }
    }

    fn reload(&mut self) {
        self.session.parse(&self.source);
        self.pending_click = None;
        if !self.session.diagnostics().is_empty() {
            self.tab = Tab::Console;
        }
    }
}

const KEY_BINDINGS: &[(egui::Key, Direction)] = &[
    (egui::Key::ArrowUp, Direction::Up),
    (egui::Key::W, Direction::Up),
    (egui::Key::ArrowDown, Direction::Down),
    (egui::Key::S, Direction::Down),
    (egui::Key::ArrowLeft, Direction::Left),
    (egui::Key::A, Direction::Left),
    (egui::Key::ArrowRight, Direction::Right),
    (egui::Key::D, Direction::Right),
];

fn collect_nudges(ctx: &egui::Context) -> Vec<Direction> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|i| {
        KEY_BINDINGS
            .iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, dir)| *dir)
            .collect()
    })
}

// ─── UI ───────────────────────────────────────────────────────────────────────

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Frame tick: input, pulse, collisions ──────────────────────────────
        let input = FrameInput {
            click: self.pending_click.take(),
            nudges: collect_nudges(ctx),
        };
        self.session.tick(&input);
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                // ── Left: editor ──────────────────────────────────────────────
                cols[0].vertical(|ui| {
                    ui.label("Source");
                    ui.add(
                        egui::TextEdit::multiline(&mut self.source)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(44),
                    );
                });

                // ── Right: output ─────────────────────────────────────────────
                cols[1].vertical(|ui| {
                    // ── Status bar ────────────────────────────────────────────
                    ui.horizontal(|ui| {
                        let error_count = self.session.diagnostics().len();
                        if error_count == 0 {
                            ui.label(RichText::new("✓  no errors").color(Color32::from_rgb(80, 200, 80)));
                        } else {
                            ui.label(RichText::new(format!("✗  {error_count} error(s)")).color(Color32::from_rgb(220, 80, 80)));
                        }
                        if let Some(name) = self.session.selection() {
                            ui.label(RichText::new(format!("selected: {name}")).monospace().color(Color32::GRAY));
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("run").clicked() {
                                self.reload();
                            }
                        });
                    });

                    ui.separator();

                    // ── Tab bar ───────────────────────────────────────────────
                    ui.horizontal(|ui| {
                        let console_label = match self.session.diagnostics().len() {
                            0 => "Console".to_string(),
                            n => format!("Console ({n})"),
                        };
                        ui.selectable_value(&mut self.tab, Tab::Console, console_label);
                        ui.selectable_value(&mut self.tab, Tab::Scene, "Scene");
                        ui.selectable_value(&mut self.tab, Tab::Variables, "Variables");
                        ui.selectable_value(&mut self.tab, Tab::Canvas, "Canvas");
                    });

                    ui.separator();

                    // ── Tab content ───────────────────────────────────────────
                    egui::ScrollArea::both().show(ui, |ui| {
                        match self.tab {
                            Tab::Console   => self.show_console(ui),
                            Tab::Scene     => self.show_scene(ui),
                            Tab::Variables => self.show_variables(ui),
                            Tab::Canvas    => self.show_canvas(ui),
                        }
                    });
                });
            });
        });
    }
}

impl App {
    fn show_console(&self, ui: &mut egui::Ui) {
        if self.session.diagnostics().is_empty() {
            ui.label(RichText::new("No errors.").color(Color32::GRAY));
            return;
        }
        for e in self.session.diagnostics() {
            let color = match e.kind {
                ErrorKind::Syntax         => Color32::from_rgb(220, 80, 80),
                ErrorKind::UnknownCommand => Color32::from_rgb(220, 180, 60),
                ErrorKind::Eval           => Color32::from_rgb(230, 130, 70),
            };
            ui.label(RichText::new(e.to_string()).monospace().color(color));
        }
    }

    fn show_scene(&mut self, ui: &mut egui::Ui) {
        if self.session.scene().is_empty() {
            ui.label(RichText::new("No objects.").color(Color32::GRAY));
            return;
        }

        let mut clicked = None;
        egui::Grid::new("scene_grid")
            .striped(true)
            .min_col_width(60.0)
            .show(ui, |ui| {
                for header in ["name", "shape", "x", "y", "size", "color", "opacity", "collidable"] {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();

                for (name, obj) in self.session.scene().iter() {
                    let selected = self.session.selection() == Some(name);
                    if ui.selectable_label(selected, RichText::new(name).monospace()).clicked() {
                        clicked = Some(name.to_string());
                    }

                    let shape_color = match obj.shape {
                        Shape::Unknown(_) => Color32::from_rgb(220, 180, 60),
                        _ => Color32::from_rgb(180, 140, 255),
                    };
                    ui.label(RichText::new(obj.shape.as_str()).monospace().color(shape_color));
                    ui.label(RichText::new(format_number(obj.x)).monospace());
                    ui.label(RichText::new(format_number(obj.y)).monospace());
                    ui.label(RichText::new(format!("{:.1}", obj.size)).monospace());
                    ui.label(RichText::new(&obj.color).monospace());
                    ui.label(RichText::new(format!("{:.2}", obj.opacity)).monospace());
                    ui.label(RichText::new(obj.collidable.to_string()).monospace());
                    ui.end_row();
                }
            });

        if let Some(name) = clicked {
            self.session.select(&name);
        }
    }

    fn show_variables(&self, ui: &mut egui::Ui) {
        if self.session.variables().is_empty() {
            ui.label(RichText::new("No variables.").color(Color32::GRAY));
            return;
        }
        egui::Grid::new("variables_grid")
            .striped(true)
            .min_col_width(80.0)
            .show(ui, |ui| {
                ui.label(RichText::new("name").strong());
                ui.label(RichText::new("value").strong());
                ui.end_row();

                for (name, value) in self.session.variables().iter() {
                    ui.label(RichText::new(name).monospace());
                    ui.label(RichText::new(format_number(value)).monospace().color(Color32::from_rgb(210, 210, 170)));
                    ui.end_row();
                }
            });
    }

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let desired = egui::vec2(CANVAS_SIZE.0, CANVAS_SIZE.1);
        let (canvas_rect, response) = ui.allocate_exact_size(desired, egui::Sense::click());
        let painter = ui.painter_at(canvas_rect);

        painter.rect_filled(canvas_rect, 0.0, Color32::from_rgb(245, 245, 245));

        let offset = canvas_rect.min;
        for (_, obj) in self.session.scene().iter() {
            paint_object(&painter, offset, obj);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.pending_click = Some(((pos.x - offset.x) as f64, (pos.y - offset.y) as f64));
            }
        }
    }
}

/// Paint one object in canvas space: `(x, y)` is the top-left of its
/// `extent × extent` box.
fn paint_object(painter: &egui::Painter, offset: egui::Pos2, obj: &GameObject) {
    let fill = palette::fill(&obj.color, obj.opacity);
    let (x, y, size) = (obj.x as f32, obj.y as f32, obj.extent() as f32);
    let at = |px: f32, py: f32| egui::pos2(offset.x + px, offset.y + py);

    match obj.shape {
        Shape::Circle => {
            painter.circle_filled(at(x + size / 2.0, y + size / 2.0), size / 2.0, fill);
        }
        Shape::Triangle => {
            let pts = vec![at(x + size / 2.0, y), at(x, y + size), at(x + size, y + size)];
            painter.add(egui::Shape::convex_polygon(pts, fill, egui::Stroke::NONE));
        }
        Shape::Square | Shape::Unknown(_) => {
            let rect = egui::Rect::from_min_size(at(x, y), egui::vec2(size, size));
            painter.rect_filled(rect, 0.0, fill);
        }
    }
}
