use quick_xml::events::Event;
use quick_xml::Reader;

use super::{sanitizar_chave, ExtractError};
use crate::workflows::validacao::domain::{NotaStatus, Origem, ValidationNote};

enum Campo {
    Chave,
    Valor,
}

/// Reads every `<Nota>` element in the document, wherever it sits in the
/// tree. Notes missing a key or carrying a non-numeric value are skipped;
/// a document that does not parse fails the whole file.
pub(crate) fn extrair(nome: &str, conteudo: &str) -> Result<Vec<ValidationNote>, ExtractError> {
    let mut reader = Reader::from_str(conteudo);
    reader.config_mut().trim_text(true);

    let mut notas = Vec::new();
    let mut buf = Vec::new();
    let mut dentro_nota = false;
    let mut campo: Option<Campo> = None;
    let mut chave: Option<String> = None;
    let mut valor: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"Nota" => {
                    dentro_nota = true;
                    chave = None;
                    valor = None;
                }
                b"chave" if dentro_nota => campo = Some(Campo::Chave),
                b"valor" if dentro_nota => campo = Some(Campo::Valor),
                _ => {}
            },
            Ok(Event::Text(ref texto)) => {
                if let Some(campo) = &campo {
                    let texto = texto
                        .xml_content()
                        .map_err(|err| ExtractError::XmlInvalido {
                            arquivo: nome.to_string(),
                            detalhe: err.to_string(),
                        })?
                        .into_owned();
                    match campo {
                        Campo::Chave => chave = Some(texto),
                        Campo::Valor => valor = Some(texto),
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"Nota" => {
                    if let Some(nota) = montar_nota(chave.take(), valor.take()) {
                        notas.push(nota);
                    }
                    dentro_nota = false;
                }
                b"chave" | b"valor" => campo = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ExtractError::XmlInvalido {
                    arquivo: nome.to_string(),
                    detalhe: err.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(notas)
}

fn montar_nota(chave: Option<String>, valor: Option<String>) -> Option<ValidationNote> {
    let chave = sanitizar_chave(chave.as_deref()?)?;
    // Comma as decimal separator is tolerated ("14250,50").
    let valor: f64 = valor?.trim().replace(',', ".").parse().ok()?;
    if !valor.is_finite() {
        return None;
    }

    Some(ValidationNote {
        chave,
        origem: Origem::Xml,
        valor: valor.round().max(0.0) as u64,
        status: NotaStatus::Validada,
        tag: "OK".to_string(),
        motivo: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrai_notas_com_chave_e_valor() {
        let conteudo = r#"<?xml version="1.0"?>
<Lote>
  <Nota><chave> 1111 2222 </chave><valor>14250,50</valor></Nota>
  <Nota><chave>33334444</chave><valor>5000</valor></Nota>
</Lote>"#;

        let notas = extrair("lote.xml", conteudo).expect("xml valido");
        assert_eq!(notas.len(), 2);
        assert_eq!(notas[0].chave, "11112222");
        assert_eq!(notas[0].valor, 14251);
        assert_eq!(notas[0].origem, Origem::Xml);
        assert_eq!(notas[0].status, NotaStatus::Validada);
        assert_eq!(notas[1].valor, 5000);
    }

    #[test]
    fn pula_notas_sem_chave_ou_com_valor_invalido() {
        let conteudo = r#"<Lote>
  <Nota><chave></chave><valor>100</valor></Nota>
  <Nota><chave>555</chave><valor>abc</valor></Nota>
  <Nota><valor>100</valor></Nota>
  <Nota><chave>666</chave><valor>200</valor></Nota>
</Lote>"#;

        let notas = extrair("lote.xml", conteudo).expect("xml valido");
        assert_eq!(notas.len(), 1);
        assert_eq!(notas[0].chave, "666");
    }

    #[test]
    fn documento_mal_formado_falha_o_arquivo() {
        let erro = extrair("lote.xml", "<Lote><Nota></Lote>").expect_err("deve falhar");
        assert!(erro.to_string().contains("XML invalido"));
    }
}
