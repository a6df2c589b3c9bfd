use crate::models::{ChatMessage, OperationKind, OperationRequest};

const FENCE_RULE: &str = "Balas HANYA dengan objek JSON yang valid. JANGAN membungkus jawaban \
dengan markdown atau blok kode ``` dan jangan menambahkan teks lain di luar JSON.";

const EXPLAIN_SCHEMA: &str = r#"Kamu adalah asisten pemrograman yang ahli. Tugas kamu adalah menjelaskan kode pemrograman dalam Bahasa Indonesia.

Format JSON yang WAJIB diikuti:
{
  "summary": "ringkasan singkat isi kode (string, tidak boleh kosong)",
  "lineNotes": [{ "line": 1, "snippet": "potongan kode pada baris tersebut (string)", "note": "penjelasan baris (string)" }],
  "keyConcepts": ["konsep penting (string)"],
  "tips": "tips berguna (string)"
}
"line" adalah nomor baris berupa bilangan bulat positif."#;

const GENERATE_SCHEMA: &str = r#"Kamu adalah programmer ahli. Buat kode dari deskripsi pengguna dan jelaskan dalam Bahasa Indonesia.

Format JSON yang WAJIB diikuti:
{
  "code": "kode lengkap yang dihasilkan (string)",
  "explanation": "penjelasan singkat cara kerja kode (string)",
  "usage": "cara menggunakan kode (string)",
  "tips": "tips optimasi atau pengembangan (string)"
}"#;

const DEBUG_SCHEMA: &str = r#"Kamu adalah ahli debugging. Cari bug pada kode pengguna dan jelaskan perbaikannya dalam Bahasa Indonesia.

Format JSON yang WAJIB diikuti:
{
  "hasError": true,
  "errors": [{ "line": 1, "kind": "jenis error (string)", "description": "deskripsi masalah (string)", "fix": "cara memperbaiki (string)" }],
  "fixedCode": "kode lengkap yang sudah diperbaiki (string)",
  "preventionTips": "tips agar error serupa tidak terulang (string)"
}
"hasError" bernilai boolean. Jika tidak ada error, isi "hasError" dengan false dan "errors" dengan daftar kosong. "line" adalah nomor baris berupa bilangan bulat positif."#;

const QUIZ_SCHEMA: &str = r#"Kamu adalah quiz master. Buat satu pertanyaan pilihan ganda dalam Bahasa Indonesia tentang kode pengguna.

Format JSON yang WAJIB diikuti:
{
  "question": "pertanyaan tentang kode (string)",
  "choices": [{ "label": "A", "text": "pilihan (string)" }, { "label": "B", "text": "pilihan (string)" }, { "label": "C", "text": "pilihan (string)" }, { "label": "D", "text": "pilihan (string)" }],
  "correctLabel": "label pilihan yang benar, salah satu dari A/B/C/D",
  "explanation": "penjelasan jawaban (string)",
  "difficulty": "easy | medium | hard"
}"#;

/// Builds the system/user message pair for a validated request. Pure and
/// deterministic: the same request always yields the same messages.
pub fn build_messages(request: &OperationRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(request.kind)),
        ChatMessage::user(user_prompt(request)),
    ]
}

pub fn system_prompt(kind: OperationKind) -> String {
    let schema = match kind {
        OperationKind::Translate => EXPLAIN_SCHEMA,
        OperationKind::Generate => GENERATE_SCHEMA,
        OperationKind::Debug => DEBUG_SCHEMA,
        OperationKind::Quiz => QUIZ_SCHEMA,
    };
    format!("{}\n\n{}", schema, FENCE_RULE)
}

fn user_prompt(request: &OperationRequest) -> String {
    let language = &request.language;
    let text = &request.primary_text;

    match request.kind {
        OperationKind::Translate => format!(
            "Jelaskan kode {} berikut:\n\n{}",
            language,
            fenced(language, text)
        ),
        OperationKind::Generate => format!("Buatkan kode {} untuk: {}", language, text),
        OperationKind::Debug => {
            let mut prompt = format!(
                "Debug kode {} berikut:\n\n{}",
                language,
                fenced(language, text)
            );
            if let Some(error_message) = &request.auxiliary_text {
                prompt.push_str("\n\nPesan error yang muncul:\n");
                prompt.push_str(error_message);
            }
            prompt
        }
        OperationKind::Quiz => {
            let difficulty = request.difficulty.unwrap_or_default();
            format!(
                "Buat quiz tingkat {} ({}) dari kode {} berikut:\n\n{}",
                difficulty.label_id(),
                difficulty.as_str(),
                language,
                fenced(language, text)
            )
        }
    }
}

fn fenced(language: &str, code: &str) -> String {
    format!("```{}\n{}\n```", language, code)
}
