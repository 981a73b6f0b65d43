use std::sync::OnceLock;

use regex::Regex;

use crate::workflows::validacao::domain::{NotaStatus, Origem, ValidationNote};

// Fixed amount window of the remittance layout, 0-indexed byte range for
// characters 35-44 of the trimmed line.
const JANELA_VALOR: std::ops::Range<usize> = 34..44;
const LARGURA_MINIMA: usize = 44;
const DIGITOS_SIGNIFICATIVOS: usize = 13;

fn re_digitos() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("regex valida"))
}

/// Line-oriented remittance parser. Per non-empty line the key is the
/// first digit run; the amount comes from the fixed window when the line
/// is wide enough, else from the second digit run. Lines with no key or
/// no numeric amount are skipped; a single bad line never fails the file.
pub(crate) fn extrair(conteudo: &str) -> Vec<ValidationNote> {
    let mut notas = Vec::new();

    for linha in conteudo.lines() {
        let linha = linha.trim();
        if linha.is_empty() {
            continue;
        }

        let mut grupos = re_digitos().find_iter(linha);
        let Some(chave) = grupos.next().map(|m| m.as_str().to_string()) else {
            continue;
        };

        let janela = if linha.len() >= LARGURA_MINIMA {
            linha.get(JANELA_VALOR).map(str::trim).unwrap_or("")
        } else {
            ""
        };
        let segmento = if janela.is_empty() {
            grupos.next().map(|m| m.as_str()).unwrap_or("")
        } else {
            janela
        };

        let bruto: String = segmento.chars().filter(char::is_ascii_digit).collect();
        let significativo = &bruto[..bruto.len().min(DIGITOS_SIGNIFICATIVOS)];
        let Ok(valor_inteiro) = significativo.parse::<u64>() else {
            continue;
        };

        // More than two digits means the amount is in minor units.
        let valor = if significativo.len() > 2 {
            (valor_inteiro + 50) / 100
        } else {
            valor_inteiro
        };

        notas.push(ValidationNote {
            chave,
            origem: Origem::Cnab,
            valor,
            status: NotaStatus::Validada,
            tag: "OK".to_string(),
            motivo: None,
        });
    }

    notas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linha_com_janela(chave: &str, janela: &str) -> String {
        format!("{chave:<34}{janela:>10}")
    }

    #[test]
    fn le_valor_da_janela_fixa_em_centavos() {
        let linha = linha_com_janela("351908123456780001905500100000", "0001425000");

        let notas = extrair(&linha);
        assert_eq!(notas.len(), 1);
        assert_eq!(notas[0].chave, "351908123456780001905500100000");
        assert_eq!(notas[0].valor, 14250);
        assert_eq!(notas[0].origem, Origem::Cnab);
    }

    #[test]
    fn linha_curta_usa_segundo_grupo_de_digitos() {
        let notas = extrair("789 ABC 45000");
        assert_eq!(notas.len(), 1);
        assert_eq!(notas[0].chave, "789");
        assert_eq!(notas[0].valor, 450);
    }

    #[test]
    fn valor_com_ate_dois_digitos_nao_converte_centavos() {
        let notas = extrair("123 99");
        assert_eq!(notas[0].valor, 99);
    }

    #[test]
    fn valor_longo_trunca_em_treze_digitos() {
        let notas = extrair("123 123456789012345");
        assert_eq!(notas.len(), 1);
        // 15 digits truncate to 1234567890123, then minor-unit conversion.
        assert_eq!(notas[0].valor, 12_345_678_901);
    }

    #[test]
    fn linhas_sem_chave_ou_sem_valor_sao_puladas() {
        let conteudo = "SEM DIGITOS AQUI\n789\n\n456 1000\n";
        let notas = extrair(conteudo);
        assert_eq!(notas.len(), 1);
        assert_eq!(notas[0].chave, "456");
        assert_eq!(notas[0].valor, 10);
    }

    #[test]
    fn arredonda_centavos_para_cima_a_partir_de_cinquenta() {
        let notas = extrair("111 1050\n222 1049");
        assert_eq!(notas[0].valor, 11);
        assert_eq!(notas[1].valor, 10);
    }
}
