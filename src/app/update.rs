use eframe::egui;

use super::{MapApp, geometry, render, search};
use crate::editor::ClickOutcome;
use crate::model::planar_distance;

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| {
            if !wants_keyboard {
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                    if self.editor.is_drawing() {
                        self.editor.toggle_draw();
                    } else if self.edit_form.is_some() {
                        self.edit_form = None;
                    } else {
                        self.editor.cancel_selection();
                    }
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::E) {
                    self.editor.toggle_draw();
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::A) {
                    self.areas_drawer_open = !self.areas_drawer_open;
                }
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Arquivo", |ui| {
                    if ui.button("Exportar áreas…").clicked() {
                        self.export_areas_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Importar áreas…").clicked() {
                        self.import_areas_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.label("Arquivo de áreas:");
                    if ui.text_edit_singleline(&mut self.areas_path).changed() {
                        self.apply_areas_path();
                    }
                });
                ui.separator();
                let draw_label = if self.editor.is_drawing() {
                    "✕ Cancelar desenho"
                } else {
                    "✏ Nova área (E)"
                };
                if ui
                    .selectable_label(self.editor.is_drawing(), draw_label)
                    .clicked()
                {
                    self.editor.toggle_draw();
                }
                if ui
                    .selectable_label(self.areas_drawer_open, "☰ Áreas (A)")
                    .clicked()
                {
                    self.areas_drawer_open = !self.areas_drawer_open;
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else if self.editor.is_drawing() {
                    ui.label("Modo desenho: clique adiciona vértice, botão direito desfaz");
                } else {
                    ui.label("Pronto");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Zoom: {:.1}", self.viewport.zoom()));
                    ui.separator();
                    ui.label(format!("Áreas: {}", self.store.list().len()));
                    if let Some(p) = self.cursor_geo {
                        ui.separator();
                        ui.label(format!("X: {:.6} / Y: {:.6}", p.lat, p.lng));
                    }
                    let pending = self.editor.pending_points();
                    if pending.len() > 2 {
                        if let Some(hover) = self.editor.hover_point() {
                            ui.separator();
                            ui.label(format!(
                                "Distância para fechar: {:.4}",
                                planar_distance(hover, pending[0])
                            ));
                        }
                    }
                });
            });
        });

        if self.areas_drawer_open {
            egui::SidePanel::right("areas_drawer")
                .default_width(260.0)
                .show(ctx, |ui| {
                    ui.heading("Áreas cadastradas");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.area_query)
                            .hint_text("Buscar área"),
                    );
                    ui.separator();

                    let areas = self.store.list();
                    let rows: Vec<(String, String)> =
                        search::filter_areas(&areas, &self.area_query)
                            .into_iter()
                            .map(|a| (a.id.clone(), a.name.clone()))
                            .collect();
                    if rows.is_empty() {
                        ui.label("Nenhuma área cadastrada.");
                    }

                    let mut locate: Option<String> = None;
                    let mut edit: Option<String> = None;
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        for (id, name) in &rows {
                            ui.horizontal(|ui| {
                                let is_selected =
                                    self.editor.selected_id() == Some(id.as_str());
                                let label = if name.is_empty() {
                                    "(sem nome)"
                                } else {
                                    name.as_str()
                                };
                                if ui.selectable_label(is_selected, label).clicked() {
                                    locate = Some(id.clone());
                                }
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.small_button("Editar").clicked() {
                                            edit = Some(id.clone());
                                        }
                                    },
                                );
                            });
                        }
                    });
                    if let Some(id) = locate {
                        self.locate_area(&id);
                    }
                    if let Some(id) = edit {
                        self.locate_area(&id);
                        self.open_edit_form(&id);
                    }
                });
        }

        self.edit_form_window(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            self.last_canvas_size = rect.size();

            let scroll_delta = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.0 {
                if let Some(hover_pos) = ctx.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(hover_pos) {
                        let zoom_delta = (1.0 + scroll_delta as f64 * 0.001).clamp(0.8, 1.25);
                        self.viewport.zoom_about_screen_point(rect, hover_pos, zoom_delta);
                    }
                }
            }

            if response.dragged() {
                self.viewport.pan_by(response.drag_delta());
            }

            let pointer_geo = ctx
                .input(|i| i.pointer.hover_pos())
                .filter(|pos| rect.contains(*pos))
                .map(|pos| self.viewport.screen_to_geo(rect, pos));
            self.cursor_geo = pointer_geo;
            if let Some(p) = pointer_geo {
                self.editor.pointer_move(p);
            }

            if response.clicked() {
                if let Some(p) = response
                    .interact_pointer_pos()
                    .map(|pos| self.viewport.screen_to_geo(rect, pos))
                {
                    if self.editor.is_drawing() {
                        if let ClickOutcome::Closed(ring) = self.editor.primary_click(p) {
                            self.create_drawn_area(ring);
                        }
                    } else {
                        let areas = self.store.list();
                        let hit = areas
                            .iter()
                            .rev()
                            .find(|a| geometry::point_in_ring(p, &a.points))
                            .map(|a| a.id.clone());
                        if let Some(id) = hit {
                            self.locate_area(&id);
                        } else {
                            self.viewport.set_view(p, self.viewport.zoom());
                        }
                    }
                }
            }
            if response.secondary_clicked() {
                self.editor.secondary_click();
            }

            let painter = ui.painter_at(rect);
            render::draw_background(&painter, rect, &self.viewport);
            let areas = self.store.list();
            render::draw_areas(&painter, rect, &self.viewport, &areas, self.editor.selected_id());
            if self.editor.is_drawing() {
                render::draw_sketch(&painter, rect, &self.viewport, &self.editor);
            }

            self.float_buttons(ctx, rect);
        });
    }
}

impl MapApp {
    /// Edit drawer for the selected area: rename, recolor, delete with a
    /// confirmation step.
    fn edit_form_window(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.edit_form.take() else {
            return;
        };
        let title = if form.title.is_empty() {
            crate::model::DEFAULT_AREA_NAME.to_string()
        } else {
            form.title.clone()
        };

        let mut open = true;
        let mut save = false;
        let mut delete = false;
        egui::Window::new(title)
            .id(egui::Id::new("area_edit_form"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Nome da área");
                ui.text_edit_singleline(&mut form.name);
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.checkbox(&mut form.has_color, "Cor da área");
                    if form.has_color {
                        ui.color_edit_button_srgb(&mut form.color);
                    }
                });
                ui.add_space(6.0);
                if ui.button("Salvar").clicked() {
                    save = true;
                }
                ui.separator();
                if form.confirm_delete {
                    ui.label("Tem certeza que deseja apagar essa área?");
                    ui.horizontal(|ui| {
                        if ui.button("Sim").clicked() {
                            delete = true;
                        }
                        if ui.button("Não").clicked() {
                            form.confirm_delete = false;
                        }
                    });
                } else if ui.button("Apagar área").clicked() {
                    form.confirm_delete = true;
                }
            });

        if save {
            self.edit_form = Some(form);
            self.save_edit_form();
        } else if delete {
            let id = form.id.clone();
            self.delete_area(&id);
        } else if open {
            self.edit_form = Some(form);
        }
    }

    /// Floating action buttons over the map, bottom-right corner.
    fn float_buttons(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        let selected = self.editor.selected_id().map(str::to_string);
        let count = 2 + if selected.is_some() { 2 } else { 0 };
        let pos = rect.right_bottom() - egui::vec2(64.0, 16.0 + 46.0 * count as f32);

        egui::Area::new(egui::Id::new("float_buttons"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    if let Some(id) = selected {
                        if float_button(ui, "✏", "Editar dados da área") {
                            self.open_edit_form(&id);
                        }
                        if float_button(ui, "✕", "Cancelar") {
                            self.editor.cancel_selection();
                        }
                    }
                    let (icon, tip) = if self.editor.is_drawing() {
                        ("✕", "Cancelar desenho")
                    } else {
                        ("+", "Criar nova área")
                    };
                    if float_button(ui, icon, tip) {
                        self.editor.toggle_draw();
                    }
                    if float_button(ui, "☰", "Áreas cadastradas") {
                        self.areas_drawer_open = !self.areas_drawer_open;
                    }
                });
            });
    }
}

fn float_button(ui: &mut egui::Ui, icon: &str, tooltip: &str) -> bool {
    ui.add_sized([40.0, 40.0], egui::Button::new(icon))
        .on_hover_text(tooltip)
        .clicked()
}
