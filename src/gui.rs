// src/gui.rs
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use eframe::egui;
use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use egui_plot::{Plot, PlotImage, PlotPoint};
use log::{debug, info, warn};
use crate::config::ViewerConfig;
use crate::document::{export_window, JsonFileSource, TraceDocument, TraceSource};
use crate::plot::{grayscale_pixels, render_slice_png};
use crate::view::{BoundsText, JumpDirection, WindowedMatrixView};
/// Largest texture side uploaded to the GPU; bigger slices are decimated.
const MAX_TEXTURE_SIDE: usize = 4096;
const STATUS_LINES: usize = 6;
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Image,
    BinaryHeader,
    TraceHeaders,
}
pub struct SegyExplorerApp {
    config: ViewerConfig,
    view: WindowedMatrixView,
    document: Option<TraceDocument>,
    source_path: Option<PathBuf>,
    // editor text, may hold half-typed bounds
    rows_text: BoundsText,
    values_text: BoundsText,
    texture: Option<TextureHandle>,
    tab: Tab,
    status: Vec<String>,
}
impl SegyExplorerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            view: WindowedMatrixView::new(config.linked_color),
            config,
            document: None,
            source_path: None,
            rows_text: BoundsText::default(),
            values_text: BoundsText::default(),
            texture: None,
            tab: Tab::Image,
            status: vec!["Ready.".to_owned()],
        }
    }
    fn log(&mut self, msg: impl Into<String>) {
        self.status.push(msg.into());
        if self.status.len() > STATUS_LINES {
            self.status.remove(0);
        }
    }
    /// Opens `path`; on failure the current file stays on screen.
    pub fn open(&mut self, path: &Path) {
        match self.try_open(path) {
            Ok(()) => {
                self.source_path = Some(path.to_path_buf());
                self.log(format!("Opened {}", path.display()));
            }
            Err(e) => {
                warn!("failed to open {}: {e:#}", path.display());
                self.log(format!("Failed to open {} - {e:#}", path.display()));
            }
        }
    }
    fn try_open(&mut self, path: &Path) -> Result<()> {
        let document = JsonFileSource::new(path)
            .read_document()
            .with_context(|| format!("cannot decode {}", path.display()))?;
        self.load_document(document)
    }
    pub fn load_document(&mut self, document: TraceDocument) -> Result<()> {
        let matrix = document.to_matrix().context("inconsistent trace data")?;
        self.view.load(matrix).context("nothing to display")?;
        info!(
            "loaded {} traces x {} samples",
            document.trace_count(),
            document.sample_count()
        );
        self.document = Some(document);
        self.sync_text();
        Ok(())
    }
    fn sync_text(&mut self) {
        if let Some(rows) = self.view.index_window() {
            self.rows_text.show_rows(rows);
        }
        if let Some(values) = self.view.value_window() {
            self.values_text.show_values(values);
        }
    }
    /// Linked mode moves the other bound too, so its field is refreshed.
    fn apply_value_text(&mut self) -> bool {
        let applied = self.values_text.apply_values(&mut self.view);
        if applied && self.view.is_linked() {
            if let Some(values) = self.view.value_window() {
                self.values_text.show_values(values);
            }
        }
        applied
    }
    fn jump(&mut self, direction: JumpDirection) {
        if self.view.jump(direction, self.config.jump_step) {
            self.sync_text();
        }
    }
    fn export_window(&mut self, path: &Path) -> Result<()> {
        let (Some(document), Some(rows)) = (&self.document, self.view.index_window()) else {
            return Ok(());
        };
        export_window(document, rows, path)
            .with_context(|| format!("cannot write {}", path.display()))
    }
    fn save_figure(&mut self, path: &Path) -> Result<()> {
        let slice = self.view.display_slice()?;
        let png = render_slice_png(&slice, &self.config.figure_style())?;
        std::fs::write(path, png).with_context(|| format!("cannot write {}", path.display()))?;
        info!("saved figure to {}", path.display());
        Ok(())
    }
    fn report(&mut self, what: &str, result: Result<()>) {
        match result {
            Ok(()) => self.log(format!("{what} done")),
            Err(e) => {
                warn!("{what} failed: {e:#}");
                self.log(format!("{what} failed - {e:#}"));
            }
        }
    }
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(redraw) = self.view.take_redraw() else {
            return;
        };
        let Ok(slice) = self.view.display_slice() else {
            return;
        };
        let frame = grayscale_pixels(&slice).decimated(MAX_TEXTURE_SIDE);
        debug!("{redraw:?} redraw, {}x{} texture", frame.width, frame.height);
        let image = ColorImage {
            size: [frame.width, frame.height],
            pixels: frame.pixels.iter().map(|&g| Color32::from_gray(g)).collect(),
        };
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("traces", image, TextureOptions::NEAREST));
            }
        }
    }
    fn menu_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("trace document", &["json"])
                    .pick_file()
                {
                    self.open(&path);
                }
            }
            let loaded = self.view.is_loaded();
            if ui
                .add_enabled(loaded, egui::Button::new("Export window…"))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("trace document", &["json"])
                    .save_file()
                {
                    let result = self.export_window(&path);
                    self.report("Export", result);
                }
            }
            if ui
                .add_enabled(loaded, egui::Button::new("Save figure…"))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("png", &["png"])
                    .save_file()
                {
                    let result = self.save_figure(&path);
                    self.report("Save figure", result);
                }
            }
            ui.separator();
            ui.selectable_value(&mut self.tab, Tab::Image, "Image");
            ui.selectable_value(&mut self.tab, Tab::BinaryHeader, "Binary header");
            ui.selectable_value(&mut self.tab, Tab::TraceHeaders, "Trace headers");
        });
    }
    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        let (Some(matrix), Some(rows), Some(values), Some(extent)) = (
            self.view.matrix(),
            self.view.index_window(),
            self.view.value_window(),
            self.view.data_extent(),
        ) else {
            ui.label("No file loaded.");
            return;
        };
        let last = matrix.trace_count() as i64 - 1;
        ui.label(format!(
            "{} traces x {} samples",
            matrix.trace_count(),
            matrix.sample_count()
        ));
        ui.separator();
        ui.heading("Traces");
        let mut min = rows.min as i64;
        let mut max = rows.max as i64;
        let min_moved = ui
            .add(egui::Slider::new(&mut min, 0..=last).text("first"))
            .changed();
        let max_moved = ui
            .add(egui::Slider::new(&mut max, 0..=last).text("last"))
            .changed();
        if min_moved || max_moved {
            let mut update = self.view.begin_update();
            update.set_index_min(min).set_index_max(max);
            update.commit();
            self.sync_text();
        }
        ui.horizontal(|ui| {
            let a = ui.text_edit_singleline(&mut self.rows_text.lower).changed();
            let b = ui.text_edit_singleline(&mut self.rows_text.upper).changed();
            if a || b {
                self.rows_text.apply_rows(&mut self.view);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("◀ Jump").clicked() {
                self.jump(JumpDirection::Left);
            }
            ui.add(egui::DragValue::new(&mut self.config.jump_step).clamp_range(1..=100));
            if ui.button("Jump ▶").clicked() {
                self.jump(JumpDirection::Right);
            }
        });
        ui.separator();
        ui.heading("Color range");
        let mut low = values.low;
        let mut high = values.high;
        let low_moved = ui
            .add(egui::Slider::new(&mut low, extent.low..=extent.high).text("low"))
            .changed();
        let high_moved = ui
            .add(egui::Slider::new(&mut high, extent.low..=extent.high).text("high"))
            .changed();
        if low_moved || high_moved {
            let mut update = self.view.begin_update();
            update.set_value_low(low).set_value_high(high);
            update.commit();
            self.sync_text();
        }
        ui.horizontal(|ui| {
            let a = ui.text_edit_singleline(&mut self.values_text.lower).changed();
            let b = ui.text_edit_singleline(&mut self.values_text.upper).changed();
            if a || b {
                self.apply_value_text();
            }
        });
        let mut linked = self.view.is_linked();
        if ui.checkbox(&mut linked, "Linked (centred)").changed() {
            self.view.set_linked(linked);
        }
    }
    fn image_ui(&self, ui: &mut egui::Ui) {
        let (Some(texture), Some(rows), Some(matrix)) =
            (&self.texture, self.view.index_window(), self.view.matrix())
        else {
            return;
        };
        let width = rows.width() as f64;
        let height = matrix.sample_count() as f64;
        // samples grow downwards, so the image sits below the x axis
        let center = PlotPoint::new(rows.min as f64 + width / 2.0, -height / 2.0);
        let image = PlotImage::new(texture.id(), center, [width as f32, height as f32]);
        Plot::new("traces").show(ui, |plot_ui| plot_ui.image(image));
    }
    fn binary_header_ui(&self, ui: &mut egui::Ui) {
        let Some(document) = &self.document else {
            return;
        };
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("binary_header")
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("tag");
                    ui.strong("value");
                    ui.end_row();
                    for (tag, value) in &document.binary_header {
                        ui.label(tag);
                        ui.label(value.to_string());
                        ui.end_row();
                    }
                });
        });
    }
    fn trace_headers_ui(&self, ui: &mut egui::Ui) {
        let Some(document) = &self.document else {
            return;
        };
        let row_height = ui.text_style_height(&egui::TextStyle::Body);
        egui::ScrollArea::both().show_rows(
            ui,
            row_height,
            document.trace_headers.len(),
            |ui, range| {
                egui::Grid::new("trace_headers")
                    .striped(true)
                    .show(ui, |ui| {
                        for key in &document.trace_header_keys {
                            ui.strong(key);
                        }
                        ui.end_row();
                        for header in &document.trace_headers[range] {
                            for value in header {
                                ui.label(value.to_string());
                            }
                            ui.end_row();
                        }
                    });
            },
        );
    }
}
impl eframe::App for SegyExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // arrow keys page through traces unless a bound editor has focus
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                self.jump(JumpDirection::Right);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                self.jump(JumpDirection::Left);
            }
        }
        self.refresh_texture(ctx);
        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_ui(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            for line in &self.status {
                ui.monospace(line);
            }
        });
        egui::SidePanel::left("controls")
            .resizable(true)
            .show(ctx, |ui| self.controls_ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Image => self.image_ui(ui),
            Tab::BinaryHeader => self.binary_header_ui(ui),
            Tab::TraceHeaders => self.trace_headers_ui(ui),
        });
        if self.view.needs_redraw() {
            ctx.request_repaint();
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::IndexWindow;
    fn document(traces: usize) -> TraceDocument {
        TraceDocument {
            traces: (0..traces).map(|i| vec![i as f32; 8]).collect(),
            ..TraceDocument::default()
        }
    }
    #[test]
    fn load_document_fills_editor_text() {
        let mut app = SegyExplorerApp::new(ViewerConfig::default());
        app.load_document(document(12)).unwrap();
        assert_eq!(app.rows_text.upper, "11");
        assert_eq!(app.values_text.lower, "0");
        assert_eq!(app.values_text.upper, "11");
    }
    #[test]
    fn failed_open_keeps_previous_file() {
        let mut app = SegyExplorerApp::new(ViewerConfig::default());
        app.load_document(document(12)).unwrap();
        app.open(Path::new("/nonexistent/traces.json"));
        assert_eq!(app.view.matrix().map(|m| m.trace_count()), Some(12));
        assert!(app.status.last().unwrap().starts_with("Failed to open"));
        assert!(app.load_document(document(0)).is_err());
        assert_eq!(app.document.as_ref().map(|d| d.trace_count()), Some(12));
    }
    #[test]
    fn jump_uses_configured_step() {
        let config = ViewerConfig {
            jump_step: 2,
            ..ViewerConfig::default()
        };
        let mut app = SegyExplorerApp::new(config);
        app.load_document(document(100)).unwrap();
        app.view.set_index_window(0, 9);
        app.jump(JumpDirection::Right);
        assert_eq!(
            app.view.index_window(),
            Some(IndexWindow { min: 20, max: 29 })
        );
        assert_eq!(app.rows_text.lower, "20");
    }
    #[test]
    fn linked_text_edit_refreshes_mirrored_bound() {
        let config = ViewerConfig {
            linked_color: true,
            ..ViewerConfig::default()
        };
        let mut app = SegyExplorerApp::new(config);
        // extent [0, 11], midpoint 5.5
        app.load_document(document(12)).unwrap();
        app.values_text.upper = "9".into();
        assert!(app.apply_value_text());
        assert_eq!(app.values_text.lower, "2");
        assert_eq!(app.values_text.upper, "9");
        app.values_text.upper = "".into();
        assert!(!app.apply_value_text());
        assert_eq!(app.values_text.lower, "2");
    }
    #[test]
    fn status_log_is_bounded() {
        let mut app = SegyExplorerApp::new(ViewerConfig::default());
        for i in 0..20 {
            app.log(format!("line {i}"));
        }
        assert_eq!(app.status.len(), STATUS_LINES);
        assert_eq!(app.status.last().map(String::as_str), Some("line 19"));
    }
}
