//! Application state machine and event dispatcher.

use std::{path::PathBuf, sync::Arc};

use anyhow::anyhow;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use kebele_cert::{PdfEngine, synthesize, template::Template};
use kebele_client::ApiClient;
use kebele_core::{
  certificate::CertificateType,
  reference::ReferenceData,
  registration::{Field, RegistrationForm, Step},
  resident::{
    DocumentStatus, FamilyMember, GeneratedDocument, IdentityDocument, Persistence,
    ResidentRecord, ServiceRequest,
  },
  roster::{self, RosterQuery, SortKey},
};

use crate::download;

// ─── Screen and view state ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  ResidentList,
  ResidentDetail,
  Register,
  Certificates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
  #[default]
  Overview,
  Family,
  Documents,
  Services,
}

impl DetailTab {
  pub fn cycle(self) -> Self {
    match self {
      Self::Overview => Self::Family,
      Self::Family => Self::Documents,
      Self::Documents => Self::Services,
      Self::Services => Self::Overview,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Overview => "Overview",
      Self::Family => "Family",
      Self::Documents => "Documents",
      Self::Services => "Services",
    }
  }
}

/// Per-view fetch state. Loading, error and empty all render distinctly;
/// `Ready(vec![])` is the empty case, not an error.
#[derive(Debug, Clone)]
pub enum Load<T> {
  Loading,
  Ready(T),
  Failed(String),
}

impl<T> Load<T> {
  pub fn ready(&self) -> Option<&T> {
    if let Self::Ready(v) = self { Some(v) } else { None }
  }

  pub fn ready_mut(&mut self) -> Option<&mut T> {
    if let Self::Ready(v) = self { Some(v) } else { None }
  }
}

// ─── Input prompt ─────────────────────────────────────────────────────────────

/// What a completed one-line prompt feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
  /// `name, relationship`
  AddFamily,
  /// `kind, number`
  AddDocument,
  /// `service`
  AddService,
  /// path of the photo to attach to the registration draft
  SetPhoto,
}

#[derive(Debug, Clone)]
pub struct Prompt {
  pub label:  &'static str,
  pub buffer: String,
  pub action: PromptAction,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state. All state is per-screen fields on this
/// struct; there is no shared store behind it.
pub struct App {
  pub screen: Screen,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
  /// Drawing capability, acquired once at startup. `None` means client-side
  /// generation reports itself unavailable instead of crashing mid-draw.
  pub engine: Option<PdfEngine>,
  pub downloads_dir: PathBuf,

  // ── Resident list ──────────────────────────────────────────────────────
  pub residents:     Load<Vec<ResidentRecord>>,
  pub query:         RosterQuery,
  pub sort_key:      SortKey,
  pub sort_desc:     bool,
  pub search_active: bool,
  pub list_cursor:   usize,

  // ── Resident detail ────────────────────────────────────────────────────
  pub selected_resident: Option<u64>,
  pub detail:            Load<ResidentRecord>,
  pub detail_tab:        DetailTab,
  pub family:            Vec<FamilyMember>,
  pub documents:         Vec<IdentityDocument>,
  pub services:          Vec<ServiceRequest>,

  // ── Registration wizard ────────────────────────────────────────────────
  pub form:            RegistrationForm,
  pub form_focus:      usize,
  pub reference:       Option<ReferenceData>,
  pub register_notice: Option<String>,

  // ── Certificate workflow ───────────────────────────────────────────────
  pub cert_search:   String,
  pub cert_cursor:   usize,
  pub cert_kind:     CertificateType,
  pub cert_template: Template,
  /// Busy flag: disables the generate triggers while one is in flight.
  pub generating:  bool,
  pub generated:   Vec<GeneratedDocument>,
  pub cert_notice: Option<String>,

  pub prompt:     Option<Prompt>,
  /// One-line message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(client: ApiClient, engine: Option<PdfEngine>, downloads_dir: PathBuf) -> Self {
    Self {
      screen: Screen::ResidentList,
      client: Arc::new(client),
      engine,
      downloads_dir,
      residents: Load::Loading,
      query: RosterQuery::default(),
      sort_key: SortKey::default(),
      sort_desc: false,
      search_active: false,
      list_cursor: 0,
      selected_resident: None,
      detail: Load::Loading,
      detail_tab: DetailTab::default(),
      family: Vec::new(),
      documents: Vec::new(),
      services: Vec::new(),
      form: RegistrationForm::new(),
      form_focus: 0,
      reference: None,
      register_notice: None,
      cert_search: String::new(),
      cert_cursor: 0,
      cert_kind: CertificateType::Birth,
      cert_template: Template::default(),
      generating: false,
      generated: Vec::new(),
      cert_notice: None,
      prompt: None,
      status_msg: String::new(),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the resident collection. Called once on startup and again only
  /// on explicit reload — filtering never refetches.
  pub async fn load_residents(&mut self) {
    self.residents = Load::Loading;
    match self.client.list_residents().await {
      Ok(rows) => {
        self.list_cursor = 0;
        self.residents = Load::Ready(rows);
      }
      Err(e) => self.residents = Load::Failed(e.to_string()),
    }
  }

  /// Transition to the detail screen for `id`, fetching the record and its
  /// sub-lists.
  pub async fn open_detail(&mut self, id: u64) {
    self.screen = Screen::ResidentDetail;
    self.selected_resident = Some(id);
    self.detail_tab = DetailTab::Overview;
    self.detail = Load::Loading;
    self.family.clear();
    self.documents.clear();
    self.services.clear();

    match self.client.get_resident(id).await {
      Ok(resident) => {
        self.detail = Load::Ready(resident);
        // Sub-lists are best-effort; a failure is a status note, not a
        // broken screen.
        match self.client.family_members(id).await {
          Ok(rows) => self.family = rows,
          Err(e) => self.status_msg = format!("Family list: {e}"),
        }
        match self.client.identity_documents(id).await {
          Ok(rows) => self.documents = rows,
          Err(e) => self.status_msg = format!("Documents: {e}"),
        }
        match self.client.service_requests(id).await {
          Ok(rows) => self.services = rows,
          Err(e) => self.status_msg = format!("Services: {e}"),
        }
      }
      Err(e) => self.detail = Load::Failed(e.to_string()),
    }
  }

  /// Load reference data once. The wizard needs it for the location
  /// selects, the certificate workflow for resolving location names.
  pub async fn ensure_reference_data(&mut self) {
    if self.reference.is_some() {
      return;
    }
    match self.client.reference_data().await {
      Ok(data) => self.reference = Some(data),
      Err(e) => self.status_msg = format!("Reference data unavailable: {e}"),
    }
  }

  // ── Roster view ───────────────────────────────────────────────────────────

  /// The filtered, sorted list the UI renders. Purely in-memory.
  pub fn roster_view(&self) -> Vec<&ResidentRecord> {
    let Some(rows) = self.residents.ready() else {
      return Vec::new();
    };
    let mut view = roster::filter(rows, &self.query);
    roster::sort(&mut view, self.sort_key, self.sort_desc);
    view
  }

  fn cursor_resident(&self) -> Option<&ResidentRecord> {
    self.roster_view().get(self.list_cursor).copied()
  }

  fn clamp_list_cursor(&mut self) {
    let len = self.roster_view().len();
    if self.list_cursor >= len {
      self.list_cursor = len.saturating_sub(1);
    }
  }

  // ── Status toggle ─────────────────────────────────────────────────────────

  /// Activate/deactivate the resident under the cursor. The API call runs
  /// first; local state changes only on success, and only for that record.
  pub async fn toggle_active(&mut self) {
    let Some((id, was_active)) = self.cursor_resident().and_then(|r| Some((r.id?, r.is_active)))
    else {
      return;
    };

    match self.client.set_resident_status(id, !was_active).await {
      Ok(()) => {
        if let Some(rows) = self.residents.ready_mut()
          && let Some(row) = rows.iter_mut().find(|r| r.id == Some(id))
        {
          row.is_active = !was_active;
        }
        self.status_msg = format!(
          "Resident {id} {}",
          if was_active { "deactivated" } else { "activated" }
        );
      }
      Err(e) => self.status_msg = format!("Status change failed: {e}"),
    }
  }

  // ── Sub-record local echo ─────────────────────────────────────────────────

  /// Append a locally-echoed pending family member, then attempt the
  /// round-trip and reconcile to Confirmed or Failed.
  pub async fn add_family(&mut self, full_name: String, relationship: String) {
    let Some(resident_id) = self.selected_resident else {
      return;
    };
    let member = FamilyMember::pending(full_name, relationship);
    let local_key = member.local_key;
    self.family.push(member.clone());

    match self.client.add_family_member(resident_id, &member).await {
      Ok(mut confirmed) => {
        confirmed.local_key = local_key;
        confirmed.persistence = Persistence::Confirmed;
        if let Some(slot) = self.family.iter_mut().find(|f| f.local_key == local_key) {
          *slot = confirmed;
        }
      }
      Err(e) => {
        if let Some(slot) = self.family.iter_mut().find(|f| f.local_key == local_key) {
          slot.persistence = Persistence::Failed;
        }
        self.status_msg = format!("Family member not saved: {e}");
      }
    }
  }

  pub async fn add_document(&mut self, kind: String, number: String) {
    let Some(resident_id) = self.selected_resident else {
      return;
    };
    let doc = IdentityDocument::pending(kind, number);
    let local_key = doc.local_key;
    self.documents.push(doc.clone());

    match self.client.add_identity_document(resident_id, &doc).await {
      Ok(mut confirmed) => {
        confirmed.local_key = local_key;
        confirmed.persistence = Persistence::Confirmed;
        if let Some(slot) = self.documents.iter_mut().find(|d| d.local_key == local_key) {
          *slot = confirmed;
        }
      }
      Err(e) => {
        if let Some(slot) = self.documents.iter_mut().find(|d| d.local_key == local_key) {
          slot.persistence = Persistence::Failed;
        }
        self.status_msg = format!("Document not saved: {e}");
      }
    }
  }

  pub async fn add_service(&mut self, service: String) {
    let Some(resident_id) = self.selected_resident else {
      return;
    };
    let request = ServiceRequest::pending(service);
    let local_key = request.local_key;
    self.services.push(request.clone());

    match self.client.add_service_request(resident_id, &request).await {
      Ok(mut confirmed) => {
        confirmed.local_key = local_key;
        confirmed.persistence = Persistence::Confirmed;
        if let Some(slot) = self.services.iter_mut().find(|s| s.local_key == local_key) {
          *slot = confirmed;
        }
      }
      Err(e) => {
        if let Some(slot) = self.services.iter_mut().find(|s| s.local_key == local_key) {
          slot.persistence = Persistence::Failed;
        }
        self.status_msg = format!("Service request not saved: {e}");
      }
    }
  }

  // ── Registration ──────────────────────────────────────────────────────────

  async fn submit_registration(&mut self) {
    let Some(draft) = self.form.finish() else {
      self.register_notice = Some("Fix the highlighted fields first".to_string());
      return;
    };

    match self.client.create_resident(&draft).await {
      Ok(created) => {
        let created_id = created.id;
        if let Some(rows) = self.residents.ready_mut() {
          rows.push(created);
        }
        self.form = RegistrationForm::new();
        self.form_focus = 0;
        self.register_notice = None;
        self.status_msg = "Resident registered".to_string();
        match created_id {
          Some(id) => self.open_detail(id).await,
          None => self.screen = Screen::ResidentList,
        }
      }
      // Inline error; the wizard keeps its state for a retry.
      Err(e) => self.register_notice = Some(e.to_string()),
    }
  }

  // ── Certificate workflow ──────────────────────────────────────────────────

  /// Residents matching the picker search, fuzzy over name and national id.
  pub fn cert_candidates(&self) -> Vec<&ResidentRecord> {
    let Some(rows) = self.residents.ready() else {
      return Vec::new();
    };
    if self.cert_search.is_empty() {
      return rows.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    rows
      .iter()
      .filter(|r| {
        matcher.fuzzy_match(&r.full_name(), &self.cert_search).is_some()
          || matcher.fuzzy_match(&r.national_id, &self.cert_search).is_some()
      })
      .collect()
  }

  fn cert_cursor_resident_id(&self) -> Option<u64> {
    self.cert_candidates().get(self.cert_cursor).and_then(|r| r.id)
  }

  /// The resident id a generate key acts on: the picker selection, or a
  /// numeric id typed straight into the search box.
  fn generation_target(&self) -> Result<u64, String> {
    if let Some(id) = self.cert_cursor_resident_id() {
      return Ok(id);
    }
    let raw = self.cert_search.trim();
    if raw.is_empty() {
      return Err("Select a saved resident first".to_string());
    }
    raw
      .parse::<u64>()
      .map_err(|_| kebele_cert::Error::InvalidResidentId(raw.to_string()).to_string())
  }

  /// Synthesize client-side and write the artifact to the downloads
  /// directory. No-op while a generation is already running.
  pub async fn generate_local(&mut self, resident_id: u64) {
    if self.generating {
      return;
    }
    self.generating = true;
    let result = self.generate_local_inner(resident_id);
    self.generating = false;

    match result {
      Ok(path) => {
        self.cert_notice = None;
        self.status_msg = format!("Saved {}", path.display());
      }
      Err(e) => self.cert_notice = Some(e.to_string()),
    }
  }

  fn generate_local_inner(&mut self, resident_id: u64) -> anyhow::Result<PathBuf> {
    let rows = self
      .residents
      .ready()
      .ok_or_else(|| anyhow!("residents are not loaded yet"))?;
    let resident = roster::find_by_id(rows, resident_id)?.clone();
    let engine = self
      .engine
      .as_ref()
      .ok_or_else(|| anyhow!("certificate renderer is not ready; try again shortly"))?;

    let out = synthesize(engine, &resident, self.cert_kind, self.reference.as_ref(), Utc::now())?;
    let path = download::save(&self.downloads_dir, &out.document.file_name, &out.bytes)?;
    self.generated.push(out.document);
    Ok(path)
  }

  /// Ask the backend to render instead; same success/error surface as the
  /// client-side path.
  pub async fn generate_remote(&mut self, resident_id: u64) {
    if self.generating {
      return;
    }
    self.generating = true;
    let result = self.generate_remote_inner(resident_id).await;
    self.generating = false;

    match result {
      Ok(path) => {
        self.cert_notice = None;
        self.status_msg = format!("Saved {}", path.display());
      }
      Err(e) => self.cert_notice = Some(e.to_string()),
    }
  }

  async fn generate_remote_inner(&mut self, resident_id: u64) -> anyhow::Result<PathBuf> {
    let rows = self
      .residents
      .ready()
      .ok_or_else(|| anyhow!("residents are not loaded yet"))?;
    let resident = roster::find_by_id(rows, resident_id)?.clone();

    let url = self.client.generate_certificate(resident_id, self.cert_kind).await?;
    let bytes = self.client.fetch_document(&url).await?;
    let file_name = kebele_cert::file_name(self.cert_kind, resident_id);
    let path = download::save(&self.downloads_dir, &file_name, &bytes)?;
    self.generated.push(GeneratedDocument {
      title: format!("{} for {}", self.cert_kind.title(), resident.full_name()),
      category: self.cert_kind.slug(),
      status: DocumentStatus::Approved,
      file_name,
      issued_at: Utc::now(),
    });
    Ok(path)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.prompt.is_some() {
      self.handle_prompt_key(key).await;
      return Ok(true);
    }

    if self.search_active && self.screen == Screen::ResidentList {
      self.handle_search_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::ResidentList => self.handle_list_key(key).await,
      Screen::ResidentDetail => self.handle_detail_key(key).await,
      Screen::Register => self.handle_register_key(key).await,
      Screen::Certificates => self.handle_cert_key(key).await,
    }
  }

  async fn handle_prompt_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.prompt = None,
      KeyCode::Backspace => {
        if let Some(p) = self.prompt.as_mut() {
          p.buffer.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(p) = self.prompt.as_mut() {
          p.buffer.push(c);
        }
      }
      KeyCode::Enter => self.finish_prompt().await,
      _ => {}
    }
  }

  async fn finish_prompt(&mut self) {
    let Some(prompt) = self.prompt.take() else {
      return;
    };
    let input = prompt.buffer.trim().to_string();
    if input.is_empty() {
      return;
    }

    match prompt.action {
      PromptAction::AddFamily => {
        let (name, relationship) = split_once_trimmed(&input);
        self.add_family(name, relationship).await;
      }
      PromptAction::AddDocument => {
        let (kind, number) = split_once_trimmed(&input);
        self.add_document(kind, number).await;
      }
      PromptAction::AddService => self.add_service(input).await,
      PromptAction::SetPhoto => {
        self.form.set_photo(Some(PathBuf::from(input)));
        self.status_msg = "Photo attached".to_string();
      }
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.query.search.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        self.query.search.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.query.search.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.roster_view().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_resident().and_then(|r| r.id) {
          self.open_detail(id).await;
        }
      }

      // Search and filters, all in-memory.
      KeyCode::Char('/') => {
        self.search_active = true;
        self.query.search.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char('g') => {
        use kebele_core::resident::Gender;
        self.query.gender = match self.query.gender {
          None => Some(Gender::Male),
          Some(Gender::Male) => Some(Gender::Female),
          Some(Gender::Female) => None,
        };
        self.clamp_list_cursor();
      }
      KeyCode::Char('m') => {
        use kebele_core::resident::MaritalStatus;
        self.query.marital_status = match self.query.marital_status {
          None => Some(MaritalStatus::Single),
          Some(MaritalStatus::Single) => Some(MaritalStatus::Married),
          Some(MaritalStatus::Married) => Some(MaritalStatus::Divorced),
          Some(MaritalStatus::Divorced) => Some(MaritalStatus::Widowed),
          Some(MaritalStatus::Widowed) => None,
        };
        self.clamp_list_cursor();
      }
      KeyCode::Char('a') => {
        self.query.active = self.query.active.cycle();
        self.clamp_list_cursor();
      }
      KeyCode::Char('s') => self.sort_key = self.sort_key.cycle(),
      KeyCode::Char('o') => self.sort_desc = !self.sort_desc,

      // Mutations and navigation to other screens.
      KeyCode::Char('t') => self.toggle_active().await,
      KeyCode::Char('r') => self.load_residents().await,
      KeyCode::Char('n') => {
        self.screen = Screen::Register;
        self.register_notice = None;
        self.ensure_reference_data().await;
      }
      KeyCode::Char('c') => {
        self.screen = Screen::Certificates;
        self.cert_notice = None;
        self.cert_cursor = 0;
        self.ensure_reference_data().await;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::ResidentList;
        self.selected_resident = None;
      }
      KeyCode::Tab => self.detail_tab = self.detail_tab.cycle(),
      KeyCode::Char('r') => {
        if let Some(id) = self.selected_resident {
          self.open_detail(id).await;
        }
      }

      KeyCode::Char('f') => {
        self.detail_tab = DetailTab::Family;
        self.prompt = Some(Prompt {
          label:  "Add family member (name, relationship)",
          buffer: String::new(),
          action: PromptAction::AddFamily,
        });
      }
      KeyCode::Char('d') => {
        self.detail_tab = DetailTab::Documents;
        self.prompt = Some(Prompt {
          label:  "Add identity document (kind, number)",
          buffer: String::new(),
          action: PromptAction::AddDocument,
        });
      }
      KeyCode::Char('v') => {
        self.detail_tab = DetailTab::Services;
        self.prompt = Some(Prompt {
          label:  "New service request (service)",
          buffer: String::new(),
          action: PromptAction::AddService,
        });
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_register_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let fields = Field::for_step(self.form.step());
    let focused = fields[self.form_focus.min(fields.len() - 1)];

    match key.code {
      KeyCode::Esc => {
        if self.form.step() == Step::Personal {
          self.screen = Screen::ResidentList;
        } else {
          self.form.back();
          self.form_focus = 0;
        }
      }

      KeyCode::Down | KeyCode::Tab => {
        self.form_focus = (self.form_focus + 1).min(fields.len() - 1);
      }
      KeyCode::Up | KeyCode::BackTab => {
        self.form_focus = self.form_focus.saturating_sub(1);
      }

      KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.prompt = Some(Prompt {
          label:  "Photo path",
          buffer: String::new(),
          action: PromptAction::SetPhoto,
        });
      }

      KeyCode::Char(c) => {
        let mut value = self.form.value(focused).to_string();
        value.push(c);
        self.form.set(focused, value);
      }
      KeyCode::Backspace => {
        let mut value = self.form.value(focused).to_string();
        value.pop();
        self.form.set(focused, value);
      }

      KeyCode::Enter => {
        if self.form.step() == Step::Address {
          self.submit_registration().await;
        } else if self.form.advance() {
          self.form_focus = 0;
        }
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_cert_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.screen = Screen::ResidentList;
        self.cert_search.clear();
      }

      KeyCode::Down => {
        let len = self.cert_candidates().len();
        if len > 0 && self.cert_cursor + 1 < len {
          self.cert_cursor += 1;
        }
      }
      KeyCode::Up => {
        self.cert_cursor = self.cert_cursor.saturating_sub(1);
      }

      KeyCode::Tab => {
        self.cert_kind = next_certificate_type(self.cert_kind);
      }
      KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.cert_template = self.cert_template.cycle();
      }

      KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        match self.generation_target() {
          Ok(id) => self.generate_remote(id).await,
          Err(notice) => self.cert_notice = Some(notice),
        }
      }
      KeyCode::Enter => match self.generation_target() {
        Ok(id) => self.generate_local(id).await,
        Err(notice) => self.cert_notice = Some(notice),
      },

      KeyCode::Backspace => {
        self.cert_search.pop();
        self.cert_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.cert_search.push(c);
        self.cert_cursor = 0;
      }

      _ => {}
    }
    Ok(true)
  }
}

fn next_certificate_type(kind: CertificateType) -> CertificateType {
  let all = CertificateType::ALL;
  let idx = all.iter().position(|k| *k == kind).unwrap_or(0);
  all[(idx + 1) % all.len()]
}

/// `"a, b"` → `("a", "b")`; no comma → the whole input and an empty second
/// part.
fn split_once_trimmed(input: &str) -> (String, String) {
  match input.split_once(',') {
    Some((a, b)) => (a.trim().to_string(), b.trim().to_string()),
    None => (input.trim().to_string(), String::new()),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
