/// Identidad canónica de una operación a partir de su nombre declarado.
///
/// Se descartan los parámetros genéricos y el prefijo de módulo, se separan
/// las palabras en camel-case con `_` y se pasa a minúsculas:
/// `Post::Operation::Create` → `create`, `HTTPBulkUpdate` → `http_bulk_update`.
pub fn canonical_identity(name: &str) -> String {
    let base = name.split('<').next().unwrap_or(name);
    let base = base.rsplit("::").next().unwrap_or(base).trim();
    underscore(base)
}

fn underscore(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();

    // Acrónimo seguido de palabra capitalizada: `HTTPServer` → `HTTP_Server`.
    let mut split: Vec<char> = Vec::with_capacity(chars.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        let acronym_end = i > 0
                          && c.is_ascii_uppercase()
                          && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase())
                          && (chars[i - 1].is_ascii_uppercase() || chars[i - 1].is_ascii_digit());
        if acronym_end {
            split.push('_');
        }
        split.push(c);
    }

    // Minúscula o dígito seguido de mayúscula: `bulkUpdate` → `bulk_Update`.
    let mut out = String::with_capacity(split.len() + 4);
    for (i, &c) in split.iter().enumerate() {
        let boundary = i > 0
                       && c.is_ascii_uppercase()
                       && (split[i - 1].is_ascii_lowercase() || split[i - 1].is_ascii_digit());
        if boundary {
            out.push('_');
        }
        out.push(if c == '-' { '_' } else { c.to_ascii_lowercase() });
    }
    out
}
