pub fn render_index(today: &str, opened_count: usize, total_days: usize) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", today)
        .replace("{{OPENED}}", &opened_count.to_string())
        .replace("{{TOTAL}}", &total_days.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Calendrier de l'Avent</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Mountains+of+Christmas:wght@700&family=Space+Grotesk:wght@400;600&display=swap');

    :root {
      --night: #0f172a;
      --slate: #1e293b;
      --red: #b91c1c;
      --green: #166534;
      --gold: #fbbf24;
      --cream: #fef3c7;
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #1e3a5f, var(--night) 70%);
      color: var(--cream);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: flex;
      flex-direction: column;
      align-items: center;
      padding: 32px 16px 64px;
    }

    header {
      text-align: center;
      display: grid;
      gap: 8px;
      margin-bottom: 28px;
    }

    h1, h2 {
      font-family: "Mountains of Christmas", "Georgia", serif;
      margin: 0;
    }

    h1 {
      color: var(--gold);
      font-size: clamp(2.4rem, 6vw, 4.2rem);
    }

    .progress {
      width: min(320px, 80vw);
      height: 8px;
      margin: 8px auto 0;
      border-radius: 999px;
      background: #334155;
      overflow: hidden;
    }

    .progress > div {
      height: 100%;
      background: var(--red);
      transition: width 600ms ease;
    }

    .hint {
      font-size: 0.8rem;
      color: #94a3b8;
      margin: 0;
    }

    .grid {
      width: min(960px, 100%);
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(120px, 1fr));
      gap: 16px;
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 16px;
      border: 2px solid transparent;
      font-family: "Mountains of Christmas", "Georgia", serif;
      font-size: 2.6rem;
      display: grid;
      place-items: center;
      position: relative;
      cursor: pointer;
      transition: transform 150ms ease;
    }

    .cell:hover {
      transform: scale(1.04);
    }

    .cell.locked {
      background: var(--slate);
      color: #64748b;
      border-color: #334155;
      cursor: not-allowed;
    }

    .cell.open {
      background: var(--red);
      color: white;
      border-color: rgba(255, 255, 255, 0.2);
    }

    .cell.opened {
      background: var(--cream);
      color: var(--red);
      border-color: var(--gold);
    }

    .cell .badge {
      position: absolute;
      right: 8px;
      bottom: 6px;
      font-size: 1rem;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.8);
      display: none;
      align-items: center;
      justify-content: center;
      padding: 16px;
      z-index: 10;
    }

    .overlay.visible {
      display: flex;
    }

    .card {
      width: min(460px, 100%);
      background: white;
      color: #1f2937;
      border-radius: 20px;
      overflow: hidden;
      box-shadow: var(--shadow);
      text-align: center;
    }

    .card header {
      background: var(--red);
      color: white;
      padding: 28px 16px;
      margin: 0;
    }

    .card section {
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .person {
      font-family: "Mountains of Christmas", "Georgia", serif;
      font-size: 2.6rem;
      margin: 0;
    }

    .person.Mathilde {
      color: #db2777;
    }

    .person.Gaylord {
      color: #2563eb;
    }

    .message {
      background: #fefce8;
      border: 1px solid #fef08a;
      color: #854d0e;
      border-radius: 12px;
      padding: 12px;
      font-style: italic;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 12px;
      padding: 14px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.5;
      cursor: wait;
    }

    .btn-primary {
      background: var(--green);
      color: white;
    }

    .btn-ghost {
      background: transparent;
      border: 2px solid #1f2937;
      color: #1f2937;
    }

    .admin-toggle {
      position: fixed;
      right: 16px;
      bottom: 16px;
      background: rgba(30, 41, 59, 0.6);
      color: #94a3b8;
      border-radius: 999px;
    }

    .admin {
      width: min(640px, 100%);
      max-height: 90vh;
      overflow-y: auto;
      background: var(--slate);
      color: white;
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .admin textarea {
      width: 100%;
      border: none;
      border-radius: 10px;
      padding: 10px;
      background: var(--night);
      color: white;
      resize: vertical;
    }

    .row {
      display: flex;
      gap: 12px;
      justify-content: space-between;
      flex-wrap: wrap;
    }

    .status {
      min-height: 1.2em;
      color: #94a3b8;
    }

    .status[data-type="error"] {
      color: #f87171;
    }
  </style>
</head>
<body>
  <header>
    <h1>Calendrier de l'Avent</h1>
    <p>Mathilde &amp; Gaylord</p>
    <div class="progress"><div id="progress-bar" style="width: 0%"></div></div>
    <p class="hint"><span id="opened">{{OPENED}}</span> / <span id="total">{{TOTAL}}</span> cases ouvertes &middot; <span id="today">{{TODAY}}</span></p>
  </header>

  <main class="grid" id="grid"></main>
  <p class="status" id="status"></p>

  <button class="admin-toggle" id="admin-toggle" type="button" title="Paramètres">⚙️</button>

  <div class="overlay" id="reveal-overlay">
    <div class="card">
      <header><h2 id="reveal-title">Le 1 Décembre</h2></header>
      <section id="reveal-hidden">
        <p>C'est au tour de...</p>
        <div style="font-size: 3rem">❓</div>
        <button class="btn-primary" id="reveal-btn" type="button">Découvrir qui ouvre !</button>
      </section>
      <section id="reveal-shown" hidden>
        <div>
          <p class="hint">C'est à</p>
          <p class="person" id="reveal-person"></p>
          <p class="hint">d'ouvrir la case !</p>
        </div>
        <div id="reveal-gift"></div>
        <div class="message" id="reveal-message" hidden></div>
      </section>
      <section>
        <button class="btn-ghost" id="reveal-close" type="button">Fermer</button>
      </section>
    </div>
  </div>

  <div class="overlay" id="admin-overlay">
    <div class="admin">
      <div id="admin-pick">
        <h2>Configuration</h2>
        <p>Qui est en train de configurer les lots ?</p>
        <div class="row">
          <button class="btn-primary" type="button" data-acting="Mathilde">👩‍🦰 Mathilde</button>
          <button class="btn-primary" type="button" data-acting="Gaylord">🧔 Gaylord</button>
        </div>
      </div>
      <div id="admin-entry" hidden>
        <h2>Cadeaux pour <span id="admin-target"></span></h2>
        <p class="hint">🤫 Tu ne vois pas les dates ici. Les lots seront distribués sur les jours où <span class="admin-target-name"></span> ouvre une case.</p>
        <p class="hint"><span id="admin-filled">0</span> lots définis, <span id="admin-remaining">0</span> restants</p>
        <div id="admin-gifts"></div>
        <label><input type="checkbox" id="admin-shuffle" checked /> Mélanger les lots à la sauvegarde (Recommandé)</label>
        <div class="row">
          <button class="btn-ghost" style="color: white; border-color: white" id="admin-back" type="button">Retour</button>
          <button class="btn-primary" id="admin-save" type="button">Valider</button>
        </div>
      </div>
      <button class="btn-ghost" style="color: #94a3b8; border-color: transparent" id="admin-close" type="button">Retour au calendrier</button>
    </div>
  </div>

  <script>
    const gridEl = document.getElementById('grid');
    const statusEl = document.getElementById('status');
    const revealOverlay = document.getElementById('reveal-overlay');
    const revealBtn = document.getElementById('reveal-btn');
    const adminOverlay = document.getElementById('admin-overlay');
    const adminGiftsEl = document.getElementById('admin-gifts');

    let calendar = null;
    let selectedDay = null;
    let acting = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Requête échouée');
      }
      return res.json();
    };

    const renderGrid = () => {
      gridEl.innerHTML = '';
      calendar.days.forEach((day) => {
        const cell = document.createElement('div');
        cell.className = 'cell ' + (day.is_opened ? 'opened' : day.can_open ? 'open' : 'locked');
        cell.textContent = day.day;
        const badge = document.createElement('span');
        badge.className = 'badge';
        badge.textContent = day.is_opened ? '✔️' : day.can_open ? '' : '🔒';
        cell.appendChild(badge);
        if (day.is_opened || day.can_open) {
          cell.addEventListener('click', () => openModal(day));
        }
        gridEl.appendChild(cell);
      });

      document.getElementById('opened').textContent = calendar.opened_count;
      document.getElementById('total').textContent = calendar.total_days;
      document.getElementById('today').textContent = calendar.today;
      const ratio = calendar.total_days ? (calendar.opened_count / calendar.total_days) * 100 : 0;
      document.getElementById('progress-bar').style.width = `${ratio}%`;
    };

    const loadCalendar = async () => {
      calendar = await request('/api/calendar');
      renderGrid();
    };

    const showRevealed = (entry) => {
      document.getElementById('reveal-hidden').hidden = true;
      document.getElementById('reveal-shown').hidden = false;
      const personEl = document.getElementById('reveal-person');
      personEl.textContent = entry.person;
      personEl.className = 'person ' + entry.person;
      document.getElementById('reveal-gift').textContent = entry.gift_content
        ? `🎁 ${entry.gift_content}`
        : 'Pas de cadeau physique enregistré, mais...';
      const messageEl = document.getElementById('reveal-message');
      messageEl.hidden = !entry.generated_message;
      messageEl.textContent = entry.generated_message ? `✨ "${entry.generated_message}"` : '';
    };

    const openModal = (day) => {
      selectedDay = day.day;
      document.getElementById('reveal-title').textContent = `Le ${day.day} Décembre`;
      document.getElementById('reveal-hidden').hidden = false;
      document.getElementById('reveal-shown').hidden = true;
      revealBtn.disabled = false;
      revealBtn.textContent = 'Découvrir qui ouvre !';
      revealOverlay.classList.add('visible');
      if (day.is_opened) {
        showRevealed(day);
      }
    };

    revealBtn.addEventListener('click', async () => {
      revealBtn.disabled = true;
      revealBtn.textContent = 'Chargement...';
      try {
        const entry = await request(`/api/days/${selectedDay}/reveal`, { method: 'POST' });
        showRevealed(entry);
        await loadCalendar();
      } catch (err) {
        setStatus(err.message, 'error');
        revealBtn.disabled = false;
        revealBtn.textContent = 'Découvrir qui ouvre !';
      }
    });

    document.getElementById('reveal-close').addEventListener('click', () => {
      revealOverlay.classList.remove('visible');
      selectedDay = null;
    });

    const updateAdminCounts = () => {
      const inputs = Array.from(adminGiftsEl.querySelectorAll('textarea'));
      const filled = inputs.filter((input) => input.value.trim().length > 0).length;
      document.getElementById('admin-filled').textContent = filled;
      document.getElementById('admin-remaining').textContent = inputs.length - filled;
    };

    const showAdminPick = () => {
      acting = null;
      document.getElementById('admin-pick').hidden = false;
      document.getElementById('admin-entry').hidden = true;
    };

    const showAdminEntry = async (person) => {
      const drafts = await request(`/api/admin/${encodeURIComponent(person)}/gifts`);
      acting = drafts.acting;
      document.getElementById('admin-target').textContent = drafts.target;
      document.querySelectorAll('.admin-target-name').forEach((el) => {
        el.textContent = drafts.target;
      });
      adminGiftsEl.innerHTML = '';
      drafts.gifts.forEach((gift, index) => {
        const label = document.createElement('label');
        label.className = 'hint';
        label.textContent = `Lot #${index + 1}`;
        const input = document.createElement('textarea');
        input.rows = 2;
        input.value = gift;
        input.placeholder = `Une surprise pour ${drafts.target}...`;
        input.addEventListener('input', updateAdminCounts);
        adminGiftsEl.appendChild(label);
        adminGiftsEl.appendChild(input);
      });
      updateAdminCounts();
      document.getElementById('admin-pick').hidden = true;
      document.getElementById('admin-entry').hidden = false;
    };

    document.querySelectorAll('[data-acting]').forEach((button) => {
      button.addEventListener('click', () => {
        showAdminEntry(button.dataset.acting).catch((err) => setStatus(err.message, 'error'));
      });
    });

    document.getElementById('admin-save').addEventListener('click', async () => {
      const gifts = Array.from(adminGiftsEl.querySelectorAll('textarea')).map((input) => input.value);
      try {
        const saved = await request('/api/admin/gifts', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            acting,
            gifts,
            shuffle: document.getElementById('admin-shuffle').checked
          })
        });
        setStatus(`${saved.filled} / ${saved.slots} lots enregistrés pour ${saved.target}`, 'ok');
        adminOverlay.classList.remove('visible');
        showAdminPick();
        await loadCalendar();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('admin-back').addEventListener('click', showAdminPick);
    document.getElementById('admin-close').addEventListener('click', () => {
      adminOverlay.classList.remove('visible');
      showAdminPick();
    });
    document.getElementById('admin-toggle').addEventListener('click', () => {
      adminOverlay.classList.add('visible');
    });

    loadCalendar().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
