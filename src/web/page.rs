//! The single-page browser UI.
//!
//! Served as one embedded HTML document: an upload control, a submit button,
//! three read-only result panes, and the report download controls.

/// The index page served at `/`.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Lectern</title>
<style>
  body {
    font-family: sans-serif;
    max-width: 1100px;
    margin: 2rem auto;
    padding: 0 1rem;
  }
  button {
    background-color: blue;
    color: white;
    border: none;
    border-radius: 8px;
    padding: 10px;
    font-size: 16px;
    cursor: pointer;
  }
  button:disabled {
    background-color: #888;
    cursor: wait;
  }
  textarea {
    border: 2px solid black;
    border-radius: 5px;
    width: 100%;
    height: 16rem;
  }
  .row {
    display: flex;
    gap: 1rem;
  }
  .row > div {
    flex: 1;
  }
  #status {
    margin: 0.5rem 0;
    color: #444;
  }
  #download-link {
    display: none;
    margin-right: 1rem;
  }
</style>
</head>
<body>
<h1>🎙 Lectern: Transcribe, Summarize &amp; Quiz</h1>
<p>Upload a lecture audio file (WAV). The system will <b>transcribe</b>,
<b>summarize</b>, and <b>generate questions</b> automatically.</p>

<input type="file" id="audio-input" accept=".wav,audio/wav">
<button id="submit-btn">Submit</button>
<p id="status"></p>

<div class="row">
  <div>
    <label for="transcript-box">📝 Transcription</label>
    <textarea id="transcript-box" readonly></textarea>
  </div>
  <div>
    <label for="summary-box">📜 Summary</label>
    <textarea id="summary-box" readonly></textarea>
  </div>
  <div>
    <label for="questions-box">🤔 Practice Questions</label>
    <textarea id="questions-box" readonly></textarea>
  </div>
</div>

<p>
  <a id="download-link" href="/download" download>lecture_summary.txt</a>
  <button id="download-btn">📥 Download</button>
</p>

<script>
const submitBtn = document.getElementById('submit-btn');
const statusLine = document.getElementById('status');

submitBtn.addEventListener('click', async () => {
  const input = document.getElementById('audio-input');
  if (!input.files.length) {
    statusLine.textContent = 'Choose an audio file first.';
    return;
  }

  submitBtn.disabled = true;
  statusLine.textContent = 'Processing… this can take a while.';

  try {
    const buffer = await input.files[0].arrayBuffer();
    const bytes = new Uint8Array(buffer);
    let binary = '';
    for (let i = 0; i < bytes.length; i += 0x8000) {
      binary += String.fromCharCode.apply(null, bytes.subarray(i, i + 0x8000));
    }

    const response = await fetch('/api/process', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ audio_base64: btoa(binary) }),
    });
    const result = await response.json();
    if (!response.ok) {
      throw new Error(result.error || response.statusText);
    }

    document.getElementById('transcript-box').value = result.transcript;
    document.getElementById('summary-box').value = result.summary;
    document.getElementById('questions-box').value = result.questions;
    document.getElementById('download-link').style.display = 'inline';
    statusLine.textContent = 'Done.';
  } catch (err) {
    statusLine.textContent = 'Error: ' + err.message;
  } finally {
    submitBtn.disabled = false;
  }
});

document.getElementById('download-btn').addEventListener('click', () => {
  document.getElementById('download-link').click();
});
</script>
</body>
</html>
"#;
