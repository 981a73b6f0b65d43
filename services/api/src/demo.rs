use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use pre_analise::config::RulesConfig;
use pre_analise::error::AppError;
use pre_analise::service::ProcessoService;
use pre_analise::workflows::elegibilidade::{
    gerar_notas_mock, gerar_quantidade_notas, SeededClienteProvider,
};
use pre_analise::workflows::parecer::{Decisao, ParecerRequest, CHECKLIST_ITENS};
use pre_analise::workflows::validacao::{
    ArquivoLote, NotaRecebida, TipoArquivo, ValidationPayload, ValidationResult,
};

use crate::infra::InMemorySessaoRepository;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Client document (CPF/CNPJ) used in the walkthrough
    #[arg(long, default_value = "12.345.678/0001-90")]
    pub(crate) documento: String,
    /// Requested loan amount for the batch stage
    #[arg(long, default_value_t = 150_000)]
    pub(crate) valor_solicitado: u64,
}

#[derive(Args, Debug)]
pub(crate) struct ValidarArgs {
    /// XML or REM files to parse and validate
    #[arg(long = "arquivo", required = true)]
    pub(crate) arquivos: Vec<PathBuf>,
    /// Client document the batch belongs to
    #[arg(long, default_value = "00000000000000")]
    pub(crate) cliente_id: String,
    /// Requested loan amount the batch is checked against
    #[arg(long, default_value_t = 150_000)]
    pub(crate) valor_solicitado: u64,
}

fn demo_service() -> ProcessoService<SeededClienteProvider, InMemorySessaoRepository> {
    ProcessoService::new(
        Arc::new(SeededClienteProvider::new()),
        Arc::new(InMemorySessaoRepository::default()),
        RulesConfig::from_env(),
    )
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = demo_service();

    println!("Pre-analise de credito - demo");
    println!("\nEtapa 1: elegibilidade ({})", args.documento);
    let elegibilidade = match service.consultar_elegibilidade(&args.documento) {
        Ok(resultado) => resultado,
        Err(err) => {
            println!("  Consulta rejeitada: {err}");
            return Ok(());
        }
    };

    println!(
        "- Cliente: {}",
        elegibilidade.cliente_nome.as_deref().unwrap_or("(sem nome)")
    );
    println!(
        "- Score {} | faturamento atual {} | dividas pagas {:.0}%",
        elegibilidade.bureau.score,
        elegibilidade.faturamento.total_atual,
        elegibilidade.bom_pagador.percentual_pago * 100.0
    );
    println!("- Faixa sugerida: {}", elegibilidade.faixa_sugerida.label());
    for motivo in &elegibilidade.motivos {
        println!("  - {motivo}");
    }

    if !elegibilidade.aprovado {
        println!("\nCliente recusado; o lote nao pode ser processado.");
        return Ok(());
    }

    println!("\nEtapa 2: validacao do lote");
    let quantidade = gerar_quantidade_notas(&elegibilidade.cliente_id);
    let notas = gerar_notas_mock(&elegibilidade.cliente_id, quantidade, TipoArquivo::Misto);
    let payload = ValidationPayload {
        cliente_id: elegibilidade.cliente_id.clone(),
        cliente_nome: elegibilidade.cliente_nome.clone(),
        nome_lote: Some("Lote demo".to_string()),
        valor_solicitado: Some(args.valor_solicitado),
        notas: notas.iter().map(NotaRecebida::from).collect(),
        ..ValidationPayload::default()
    };

    let resultado = match service.processar_lote(payload) {
        Ok(resultado) => resultado,
        Err(err) => {
            println!("  Lote rejeitado: {err}");
            return Ok(());
        }
    };
    imprimir_resumo(&resultado);

    println!("\nEtapa 3: parecer final");
    let checklist: BTreeMap<String, bool> = CHECKLIST_ITENS
        .iter()
        .map(|item| (item.to_string(), true))
        .collect();
    let registro = match service.registrar_parecer(ParecerRequest {
        decisao: Decisao::Aprovado,
        observacoes: Some("Demo: aprovado com checklist completo.".to_string()),
        checklist: Some(checklist),
    }) {
        Ok(registro) => registro,
        Err(err) => {
            println!("  Parecer rejeitado: {err}");
            return Ok(());
        }
    };

    println!(
        "- Decisao {} registrada em {}",
        registro.decisao.label(),
        registro.registrado_em
    );
    match serde_json::to_string_pretty(&registro) {
        Ok(json) => println!("  Registro de auditoria:\n{json}"),
        Err(err) => println!("  Registro de auditoria indisponivel: {err}"),
    }

    Ok(())
}

pub(crate) fn run_validar(args: ValidarArgs) -> Result<(), AppError> {
    let service = demo_service();

    let mut arquivos_upload = Vec::with_capacity(args.arquivos.len());
    for caminho in &args.arquivos {
        let conteudo = std::fs::read_to_string(caminho)?;
        let nome = caminho
            .file_name()
            .map(|nome| nome.to_string_lossy().into_owned())
            .unwrap_or_else(|| caminho.display().to_string());
        arquivos_upload.push(ArquivoLote { nome, conteudo });
    }

    let payload = ValidationPayload {
        cliente_id: args.cliente_id,
        valor_solicitado: Some(args.valor_solicitado),
        arquivos_upload,
        ..ValidationPayload::default()
    };

    match service.processar_lote(payload) {
        Ok(resultado) => {
            imprimir_resumo(&resultado);
            Ok(())
        }
        Err(err) => {
            println!("Lote rejeitado: {err}");
            Ok(())
        }
    }
}

fn imprimir_resumo(resultado: &ValidationResult) {
    let resumo = &resultado.summary;
    println!(
        "- {} notas ({} validas, {} invalidas) | tipo {}",
        resumo.total_notas,
        resumo.validas,
        resumo.invalidas,
        resultado.tipo_arquivo.label()
    );
    for nota in &resultado.notas {
        let motivo = nota
            .motivo
            .as_deref()
            .map(|motivo| format!(" ({motivo})"))
            .unwrap_or_default();
        println!(
            "  - {} | {} | {} | {}{}",
            nota.chave,
            nota.origem.label(),
            nota.valor,
            nota.tag,
            motivo
        );
    }
    println!(
        "- Valor validado {} de {} solicitado ({}% valido)",
        resumo.valor_total_validas, resumo.valor_solicitado, resumo.percentual_valido
    );
    println!(
        "- Tolerancia {}%: {}",
        resumo.tolerancia,
        match resumo.status {
            pre_analise::workflows::validacao::StatusTolerancia::Dentro => "dentro da tolerancia",
            pre_analise::workflows::validacao::StatusTolerancia::Fora =>
                "fora da tolerancia, abrir tarefa manual",
        }
    );
}
