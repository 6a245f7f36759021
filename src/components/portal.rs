//! Portal component - Main application screen
//!
//! Displays the page tabs, the grid of the active page, a status line and
//! the help bar. Owns one grid per page plus the campaign filter; the
//! records themselves stay in `PortalData` and are handed in on every call.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, DataGrid};
use crate::grid::SortDirection;
use crate::model::{
    Campaign, CampaignFilter, Contact, ContactList, EmailTemplate, Page, PdfTemplate, PortalData,
};
use crate::pages;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use std::io;

/// Portal component for the main application view
pub struct PortalComponent {
    pub active_page: Page,
    pub campaign_filter: CampaignFilter,

    pub campaigns: DataGrid<Campaign>,
    pub contacts: DataGrid<Contact>,
    pub contact_lists: DataGrid<ContactList>,
    pub templates: DataGrid<EmailTemplate>,
    pub pdf_templates: DataGrid<PdfTemplate>,

    /// Campaigns matching `campaign_filter`, rebuilt by `refresh`
    visible_campaigns: Vec<Campaign>,
}

impl Default for PortalComponent {
    fn default() -> Self {
        Self::new("updated_at", SortDirection::Descending)
    }
}

impl PortalComponent {
    /// Every grid starts sorted by `sort_key` in `direction`
    pub fn new(sort_key: &str, direction: SortDirection) -> Self {
        Self {
            active_page: Page::Campaigns,
            campaign_filter: CampaignFilter::default(),
            campaigns: pages::campaign_grid(sort_key, direction),
            contacts: pages::contact_grid(sort_key, direction),
            contact_lists: pages::contact_list_grid(sort_key, direction),
            templates: pages::template_grid(sort_key, direction),
            pdf_templates: pages::pdf_template_grid(sort_key, direction),
            visible_campaigns: Vec::new(),
        }
    }

    /// Pick up a changed dataset
    pub fn refresh(&mut self, data: &PortalData) {
        self.visible_campaigns = data.filtered_campaigns(self.campaign_filter);
        self.campaigns.set_title(format!(
            "{} Campaigns",
            self.campaign_filter.name()
        ));
    }

    pub fn visible_campaigns(&self) -> &[Campaign] {
        &self.visible_campaigns
    }

    pub fn next_page(&mut self) {
        self.active_page = self.active_page.next();
    }

    pub fn previous_page(&mut self) {
        self.active_page = self.active_page.previous();
    }

    pub fn toggle_archived(&mut self, data: &PortalData) {
        self.campaign_filter = self.campaign_filter.toggled();
        self.refresh(data);
    }

    /// Number of records shown on the active page
    pub fn record_count(&self, data: &PortalData) -> usize {
        match self.active_page {
            Page::Campaigns => self.visible_campaigns.len(),
            Page::Contacts => data.contacts.len(),
            Page::ContactLists => data.contact_lists.len(),
            Page::Templates => data.templates.len(),
            Page::PdfTemplates => data.pdf_templates.len(),
        }
    }

    /// Route a grid Action to the active page's grid
    pub fn apply(&mut self, action: &Action, data: &PortalData) -> Option<Action> {
        match self.active_page {
            Page::Campaigns => self.campaigns.apply(action, &self.visible_campaigns),
            Page::Contacts => self.contacts.apply(action, &data.contacts),
            Page::ContactLists => self.contact_lists.apply(action, &data.contact_lists),
            Page::Templates => self.templates.apply(action, &data.templates),
            Page::PdfTemplates => self.pdf_templates.apply(action, &data.pdf_templates),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, data: &PortalData) -> Option<Action> {
        match self.active_page {
            Page::Campaigns => self.campaigns.handle_mouse(mouse, &self.visible_campaigns),
            Page::Contacts => self.contacts.handle_mouse(mouse, &data.contacts),
            Page::ContactLists => self.contact_lists.handle_mouse(mouse, &data.contact_lists),
            Page::Templates => self.templates.handle_mouse(mouse, &data.templates),
            Page::PdfTemplates => self.pdf_templates.handle_mouse(mouse, &data.pdf_templates),
        }
    }

    /// Write the active page, in display order, as CSV
    pub fn export_csv<W: io::Write>(&self, data: &PortalData, writer: W) -> Result<usize> {
        match self.active_page {
            Page::Campaigns => self.campaigns.export_csv(&self.visible_campaigns, writer),
            Page::Contacts => self.contacts.export_csv(&data.contacts, writer),
            Page::ContactLists => self.contact_lists.export_csv(&data.contact_lists, writer),
            Page::Templates => self.templates.export_csv(&data.templates, writer),
            Page::PdfTemplates => self.pdf_templates.export_csv(&data.pdf_templates, writer),
        }
    }

    /// "sorted by Start Date ▲" for the active grid
    fn sort_description(&self) -> Option<String> {
        let (columns, sort) = match self.active_page {
            Page::Campaigns => (header_of(&self.campaigns), self.campaigns.sort_state()),
            Page::Contacts => (header_of(&self.contacts), self.contacts.sort_state()),
            Page::ContactLists => (header_of(&self.contact_lists), self.contact_lists.sort_state()),
            Page::Templates => (header_of(&self.templates), self.templates.sort_state()),
            Page::PdfTemplates => (header_of(&self.pdf_templates), self.pdf_templates.sort_state()),
        };
        let key = sort.key.as_deref()?;
        let header = columns
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, header)| header)?;
        Some(format!("sorted by {} {}", header, sort.direction.indicator()))
    }

    fn draw_active_grid(&mut self, frame: &mut Frame, area: Rect, data: &PortalData) {
        match self.active_page {
            Page::Campaigns => self
                .campaigns
                .draw_with_data(frame, area, &self.visible_campaigns),
            Page::Contacts => self.contacts.draw_with_data(frame, area, &data.contacts),
            Page::ContactLists => self
                .contact_lists
                .draw_with_data(frame, area, &data.contact_lists),
            Page::Templates => self.templates.draw_with_data(frame, area, &data.templates),
            Page::PdfTemplates => self
                .pdf_templates
                .draw_with_data(frame, area, &data.pdf_templates),
        }
    }

    fn active_grid_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.active_page {
            Page::Campaigns => self.campaigns.handle_key_event(key),
            Page::Contacts => self.contacts.handle_key_event(key),
            Page::ContactLists => self.contact_lists.handle_key_event(key),
            Page::Templates => self.templates.handle_key_event(key),
            Page::PdfTemplates => self.pdf_templates.handle_key_event(key),
        }
    }
}

fn header_of<T>(grid: &DataGrid<T>) -> Vec<(String, String)> {
    grid.columns()
        .iter()
        .map(|c| (c.key.clone(), c.header.clone()))
        .collect()
}

impl Component for PortalComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char('a') if self.active_page == Page::Campaigns => {
                Some(Action::ToggleArchived)
            }
            KeyCode::Char('X') => Some(Action::ExportView),
            KeyCode::Char('R') => Some(Action::ReloadData),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Esc => Some(Action::DismissNotification),
            _ => return self.active_grid_key(key),
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_portal_screen which takes the dataset
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the portal screen
pub struct PortalRenderContext<'a> {
    pub data: &'a PortalData,
    pub data_path: &'a str,
    pub error: Option<&'a str>,
}

/// Draw the portal screen
pub fn draw_portal_screen(
    frame: &mut Frame,
    area: Rect,
    portal: &mut PortalComponent,
    ctx: &PortalRenderContext,
) {
    let layout = calculate_main_layout(area);

    render_tabs(frame, layout.tabs, portal);
    match ctx.error {
        Some(error) => render_error(frame, layout.grid, error),
        None => portal.draw_active_grid(frame, layout.grid, ctx.data),
    }
    render_status_bar(frame, layout.status, portal, ctx);
    render_help_bar(frame, layout.help, portal, ctx.error.is_some());
}

fn render_tabs(frame: &mut Frame, area: Rect, portal: &PortalComponent) {
    let pages = Page::all();
    let titles: Vec<&str> = pages.iter().map(|p| p.name()).collect();
    let selected = pages
        .iter()
        .position(|p| *p == portal.active_page)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(" Portal ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let mut lines = vec![Line::from("")];
    lines.extend(error.lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    portal: &PortalComponent,
    ctx: &PortalRenderContext,
) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", portal.active_page.name()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if portal.active_page == Page::Campaigns {
        spans.push(Span::styled(
            format!(" {} ", portal.campaign_filter.name()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        format!("{} records", portal.record_count(ctx.data)),
        Style::default().fg(Color::White),
    ));

    if let Some(sort) = portal.sort_description() {
        spans.push(Span::styled(
            format!("  {}", sort),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        format!("  {}", ctx.data_path),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

fn key_hint(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, portal: &PortalComponent, has_error: bool) {
    let help_spans = if has_error {
        vec![
            key_hint("n", Color::Green),
            Span::raw("Create empty dataset "),
            key_hint("R", Color::Cyan),
            Span::raw("Retry "),
            key_hint("q", Color::Yellow),
            Span::raw("Quit"),
        ]
    } else {
        let mut spans = vec![
            key_hint("q", Color::Yellow),
            Span::raw("Quit "),
            key_hint("Tab", Color::Cyan),
            Span::raw("Page "),
            key_hint("s/1-9", Color::Cyan),
            Span::raw("Sort "),
            key_hint("e", Color::Blue),
            Span::raw("Edit "),
            key_hint("c", Color::Green),
            Span::raw("Duplicate "),
            key_hint("d", Color::Red),
            Span::raw("Delete "),
            key_hint("X", Color::Magenta),
            Span::raw("Export "),
        ];
        if portal.active_page == Page::Campaigns {
            spans.push(key_hint("a", Color::Magenta));
            spans.push(Span::raw(format!(
                "{} ",
                portal.campaign_filter.toggled().name()
            )));
        }
        spans.push(key_hint("?", Color::White));
        spans.push(Span::raw("Help"));
        spans
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}
