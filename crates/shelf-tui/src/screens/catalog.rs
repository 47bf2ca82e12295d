//! Catalog screen — search box, category selector, product grid with a
//! detail pane, and the load-more affordance.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use shelf_core::{CategoryFilter, FilterState, Product, ViewModel, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// Rows for the selected product's detail pane, borders included.
const DETAIL_HEIGHT: u16 = 6;

pub struct CatalogScreen {
    view: Arc<ViewModel>,
    /// "All" followed by the service's categories.
    categories: Vec<CategoryFilter>,
    /// Search text being edited; mirrors the catalog filter once sent.
    search_query: String,
    search_active: bool,
    table_state: TableState,
}

impl Default for CatalogScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogScreen {
    pub fn new() -> Self {
        Self {
            view: Arc::new(ViewModel {
                state: ViewState::Loading,
                requested_count: 0,
                loaded_count: 0,
                filter: FilterState::default(),
            }),
            categories: vec![CategoryFilter::All],
            search_query: String::new(),
            search_active: false,
            table_state: TableState::default(),
        }
    }

    fn products(&self) -> &[Product] {
        self.view.state.products()
    }

    fn selected_product(&self) -> Option<&Product> {
        self.table_state
            .selected()
            .and_then(|i| self.products().get(i))
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.products().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.products().len();
        match (self.table_state.selected(), len) {
            (_, 0) => self.table_state.select(None),
            (None, _) => self.table_state.select(Some(0)),
            (Some(i), _) if i >= len => self.table_state.select(Some(len - 1)),
            _ => {}
        }
    }

    /// Category `step` positions away from the current one, wrapping.
    fn cycle_category(&self, forward: bool) -> CategoryFilter {
        let len = self.categories.len();
        let current = self
            .categories
            .iter()
            .position(|c| *c == self.view.filter.category)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.categories
            .get(next)
            .cloned()
            .unwrap_or(CategoryFilter::All)
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.search_active = false;
                self.search_query.clear();
                Some(Action::SearchChanged(String::new()))
            }
            KeyCode::Enter => {
                self.search_active = false;
                None
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                Some(Action::SearchChanged(self.search_query.clone()))
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                Some(Action::SearchChanged(self.search_query.clone()))
            }
            _ => None,
        }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let search_style = if self.search_active {
            theme::border_active()
        } else {
            theme::table_row()
        };
        let cursor = if self.search_active { "▏" } else { "" };
        let line = Line::from(vec![
            Span::styled(" Search: ", theme::key_hint()),
            Span::styled(format!("{}{cursor}", self.search_query), search_style),
            Span::styled("   Category: ", theme::key_hint()),
            Span::styled(self.view.filter.category.to_string(), theme::title_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect, products: &[Product]) {
        let header = Row::new(["ID", "Title", "Category", "Price", "Rating"].map(Cell::from))
            .style(theme::table_header());

        let rows = products.iter().map(|p| {
            let rating = p
                .rating
                .map(|r| format!("{:.1} ({})", r.rate, r.count))
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(p.id.to_string()),
                Cell::from(p.title.clone()),
                Cell::from(p.category.clone()),
                Cell::from(format!("{:.2}", p.price)).style(theme::price()),
                Cell::from(rating),
            ])
            .style(theme::table_row())
        });

        let widths = [
            Constraint::Length(5),
            Constraint::Fill(3),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(frame: &mut Frame, area: Rect, product: &Product) {
        let block = Block::default()
            .title(format!(" #{} ", product.id))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border());

        let image = if product.image.is_empty() {
            "-"
        } else {
            product.image.as_str()
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(product.title.clone(), theme::title_style()),
                Span::raw("  "),
                Span::styled(format!("{:.2}", product.price), theme::price()),
            ]),
            Line::from(vec![
                Span::styled("Image: ", theme::key_hint()),
                Span::styled(image.to_owned(), theme::table_row()),
            ]),
            Line::from(Span::styled(product.description.clone(), theme::table_row())),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("  / ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("c/C ", theme::key_hint_key()),
            Span::styled("category  ", theme::key_hint()),
        ];
        if self.view.state.load_more() {
            spans.push(Span::styled("m ", theme::key_hint_key()));
            spans.push(Span::styled("load more  ", theme::key_hint()));
        }
        spans.push(Span::styled("r ", theme::key_hint_key()));
        spans.push(Span::styled("reload  ", theme::key_hint()));
        spans.push(Span::styled("? ", theme::key_hint_key()));
        spans.push(Span::styled("help", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for CatalogScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_active {
            return Ok(self.handle_search_key(key));
        }

        let action = match key.code {
            KeyCode::Char('/') => {
                self.search_active = true;
                None
            }
            KeyCode::Char('c') => Some(Action::CategorySelected(self.cycle_category(true))),
            KeyCode::Char('C') => Some(Action::CategorySelected(self.cycle_category(false))),
            KeyCode::Char('m') if self.view.state.load_more() => Some(Action::LoadMore),
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ViewUpdated(view) => {
                self.view = Arc::clone(view);
                self.clamp_selection();
            }
            Action::CategoriesLoaded(names) => {
                self.categories = std::iter::once(CategoryFilter::All)
                    .chain(names.iter().cloned().map(CategoryFilter::from))
                    .collect();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if matches!(self.view.state, ViewState::Loading) {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading...", theme::loading())),
                area,
            );
            return;
        }

        let shown = self.products().len();
        let title = format!(
            " Products ({shown}/{}) [requested {}] ",
            self.view.loaded_count, self.view.requested_count
        );
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filter_area, body_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_filter_bar(frame, filter_area);

        match &self.view.state {
            ViewState::Error { message } => {
                frame.render_widget(
                    Paragraph::new(Span::styled(format!("Error: {message}"), theme::error())),
                    body_area,
                );
            }
            ViewState::Ready { products, .. } => match self.selected_product() {
                Some(product) => {
                    let [grid_area, detail_area] = Layout::vertical([
                        Constraint::Fill(1),
                        Constraint::Length(DETAIL_HEIGHT),
                    ])
                    .areas(body_area);
                    self.render_grid(frame, grid_area, products);
                    Self::render_detail(frame, detail_area, product);
                }
                None => self.render_grid(frame, body_area, products),
            },
            ViewState::Loading => {}
        }

        self.render_hints(frame, hints_area);
    }

    fn captures_input(&self) -> bool {
        self.search_active
    }

    fn id(&self) -> &'static str {
        "Catalog"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn product(id: u64, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.into(),
            description: String::new(),
            price: 9.5,
            image: String::new(),
            category: category.into(),
            rating: None,
        }
    }

    fn view(state: ViewState, requested_count: u32) -> Action {
        let loaded_count = state.products().len();
        Action::ViewUpdated(Arc::new(ViewModel {
            state,
            requested_count,
            loaded_count,
            filter: FilterState::default(),
        }))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rendered(screen: &CatalogScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn loading_shows_only_indicator() {
        let screen = CatalogScreen::new();
        let text = rendered(&screen);
        assert!(text.contains("Loading..."));
        for hidden in ["Search:", "Category:", "Products", "reload", "load more"] {
            assert!(!text.contains(hidden), "{hidden:?} rendered while loading");
        }
        assert_eq!(text.trim(), "Loading...");
    }

    #[test]
    fn error_shows_message_without_grid() {
        let mut screen = CatalogScreen::new();
        screen
            .update(&view(
                ViewState::Error {
                    message: "Network response was not ok".into(),
                },
                10,
            ))
            .unwrap();
        let text = rendered(&screen);
        assert!(text.contains("Network response was not ok"));
        assert!(!text.contains("Title"));
    }

    #[test]
    fn ready_grid_shows_load_more_hint_only_when_visible() {
        let mut screen = CatalogScreen::new();
        let products = vec![product(1, "Desk Lamp", "home")];
        screen
            .update(&view(
                ViewState::Ready {
                    products: products.clone(),
                    load_more: true,
                },
                1,
            ))
            .unwrap();
        let text = rendered(&screen);
        assert!(text.contains("Desk Lamp"));
        assert!(text.contains("load more"));
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('m'))).unwrap(),
            Some(Action::LoadMore)
        );

        screen
            .update(&view(
                ViewState::Ready {
                    products,
                    load_more: false,
                },
                10,
            ))
            .unwrap();
        assert!(!rendered(&screen).contains("load more"));
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('m'))).unwrap(), None);
    }

    #[test]
    fn search_mode_captures_keys() {
        let mut screen = CatalogScreen::new();
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('/'))).unwrap(), None);
        assert!(screen.captures_input());

        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('m'))).unwrap(),
            Some(Action::SearchChanged("m".into()))
        );
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Backspace)).unwrap(),
            Some(Action::SearchChanged(String::new()))
        );
        screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(!screen.captures_input());
    }

    fn with_category(category: CategoryFilter) -> Action {
        Action::ViewUpdated(Arc::new(ViewModel {
            state: ViewState::Ready {
                products: Vec::new(),
                load_more: false,
            },
            requested_count: 10,
            loaded_count: 0,
            filter: FilterState {
                search_term: String::new(),
                category,
            },
        }))
    }

    #[test]
    fn category_cycles_through_options_with_all_first() {
        let mut screen = CatalogScreen::new();
        screen
            .update(&Action::CategoriesLoaded(vec![
                "electronics".into(),
                "jewelery".into(),
            ]))
            .unwrap();

        let electronics = CategoryFilter::Only("electronics".into());
        let jewelery = CategoryFilter::Only("jewelery".into());

        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('c'))).unwrap(),
            Some(Action::CategorySelected(electronics.clone()))
        );
        screen.update(&with_category(electronics)).unwrap();

        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('c'))).unwrap(),
            Some(Action::CategorySelected(jewelery.clone()))
        );
        screen.update(&with_category(jewelery)).unwrap();

        // Forward from the last option wraps to "All".
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('c'))).unwrap(),
            Some(Action::CategorySelected(CategoryFilter::All))
        );
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('C'))).unwrap(),
            Some(Action::CategorySelected(CategoryFilter::Only(
                "electronics".into()
            )))
        );
    }

    #[test]
    fn selection_is_clamped_to_grid() {
        let mut screen = CatalogScreen::new();
        screen
            .update(&view(
                ViewState::Ready {
                    products: vec![product(1, "A", "x"), product(2, "B", "x")],
                    load_more: false,
                },
                10,
            ))
            .unwrap();
        assert_eq!(screen.table_state.selected(), Some(0));

        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(screen.table_state.selected(), Some(1));

        screen
            .update(&view(
                ViewState::Ready {
                    products: Vec::new(),
                    load_more: false,
                },
                10,
            ))
            .unwrap();
        assert_eq!(screen.table_state.selected(), None);
    }

    #[test]
    fn detail_pane_follows_selection() {
        let mut screen = CatalogScreen::new();
        let mut lamp = product(1, "Desk Lamp", "home");
        lamp.description = "Warm light for late reading".into();
        lamp.image = "https://img.test/lamp.png".into();
        let mut mug = product(2, "Coffee Mug", "home");
        mug.description = "Holds a generous pour".into();
        mug.image = "https://img.test/mug.png".into();

        screen
            .update(&view(
                ViewState::Ready {
                    products: vec![lamp, mug],
                    load_more: false,
                },
                10,
            ))
            .unwrap();

        let text = rendered(&screen);
        assert!(text.contains("Warm light for late reading"));
        assert!(text.contains("https://img.test/lamp.png"));
        assert!(!text.contains("Holds a generous pour"));

        screen.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let text = rendered(&screen);
        assert!(text.contains("Holds a generous pour"));
        assert!(text.contains("https://img.test/mug.png"));
        assert!(!text.contains("Warm light for late reading"));
    }

    #[test]
    fn empty_grid_has_no_detail_pane() {
        let mut screen = CatalogScreen::new();
        screen
            .update(&view(
                ViewState::Ready {
                    products: Vec::new(),
                    load_more: false,
                },
                10,
            ))
            .unwrap();
        let text = rendered(&screen);
        assert!(text.contains("Search:"));
        assert!(!text.contains("Image:"));
    }
}
