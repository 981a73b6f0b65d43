//! Format-specific note extractors and the per-upload merge.

mod cnab;
mod xml;

use std::collections::HashSet;

use super::domain::{ArquivoLote, TipoArquivo, ValidationNote};

/// Extraction failures. Any single failing file aborts the whole upload;
/// there is no partial-success path.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("XML invalido ou mal formatado.")]
    XmlInvalido { arquivo: String, detalhe: String },
    #[error("Formato de arquivo nao suportado: {0}")]
    FormatoNaoSuportado(String),
}

/// Parses every uploaded file and merges the notes into one sequence
/// deduplicated by key, first occurrence winning (file order, then
/// in-file order).
pub fn extrair_notas_dos_arquivos(
    arquivos: &[ArquivoLote],
) -> Result<Vec<ValidationNote>, ExtractError> {
    let mut vistas = HashSet::new();
    let mut notas = Vec::new();

    for arquivo in arquivos {
        for nota in extrair_notas(&arquivo.nome, &arquivo.conteudo)? {
            if vistas.insert(nota.chave.clone()) {
                notas.push(nota);
            }
        }
    }

    Ok(notas)
}

/// Dispatches one file to its extractor based on the lowercased extension.
pub fn extrair_notas(nome: &str, conteudo: &str) -> Result<Vec<ValidationNote>, ExtractError> {
    let nome_minusculo = nome.to_ascii_lowercase();
    if nome_minusculo.ends_with(".xml") {
        xml::extrair(nome, conteudo)
    } else if nome_minusculo.ends_with(".rem") {
        Ok(cnab::extrair(conteudo))
    } else {
        Err(ExtractError::FormatoNaoSuportado(nome.to_string()))
    }
}

/// Infers the declared batch format from the uploaded file names: all XML,
/// all CNAB, or mixed/unknown.
pub fn inferir_tipo_upload(arquivos: &[ArquivoLote]) -> TipoArquivo {
    if arquivos.is_empty() {
        return TipoArquivo::Misto;
    }

    let mut tem_xml = false;
    let mut tem_cnab = false;
    let mut outro = false;

    for arquivo in arquivos {
        let nome = arquivo.nome.to_ascii_lowercase();
        if nome.ends_with(".xml") {
            tem_xml = true;
        } else if nome.ends_with(".rem") || nome.ends_with(".cnab") {
            tem_cnab = true;
        } else {
            outro = true;
        }
    }

    match (tem_xml, tem_cnab, outro) {
        (_, _, true) | (true, true, _) => TipoArquivo::Misto,
        (true, false, false) => TipoArquivo::Xml,
        (false, true, false) => TipoArquivo::Cnab,
        (false, false, false) => TipoArquivo::Misto,
    }
}

/// Strips every whitespace character; an empty remainder means no key.
pub(crate) fn sanitizar_chave(valor: &str) -> Option<String> {
    let chave: String = valor.split_whitespace().collect();
    if chave.is_empty() {
        None
    } else {
        Some(chave)
    }
}
