// region:    --- Imports
use clap::{Parser, Subcommand};
use leilao_client::api::models::{BidFilters, Configuration, Item};
use leilao_client::app::AppContext;
use leilao_client::auth::RouteAccess;
use leilao_client::config::Config;
use leilao_client::error::AppError;
use leilao_client::toast::{ToastRequest, ToastStore, ToastVariant};
use leilao_client::views::{DashboardView, HomeView, ItemDetailsView, LoginView};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Cli
#[derive(Parser)]
#[command(name = "leilao", about = "Cliente do Leilão Missionário")]
struct Cli {
    /// 백엔드 API 주소
    #[arg(long, env = "LEILAO_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 상품 목록
    Itens {
        #[arg(long)]
        campanha: Option<i64>,
    },
    /// 상품 상세
    Item { id: i64 },
    /// 입찰
    Lance {
        item_id: i64,
        #[arg(long)]
        nome: String,
        #[arg(long)]
        telefone: String,
        /// 생략하면 최소 입찰 금액
        #[arg(long)]
        valor: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        senha: String,
    },
    Logout,
    Dashboard,
    Campanhas {
        #[arg(long)]
        status: Option<String>,
    },
    Categorias,
    /// 입찰 내역 (관리자)
    Lances {
        #[arg(long)]
        item: Option<i64>,
        #[arg(long)]
        categoria: Option<i64>,
        #[arg(long)]
        inicio: Option<String>,
        #[arg(long)]
        fim: Option<String>,
        /// CSV로 내보내기
        #[arg(long)]
        csv: bool,
    },
    Auditoria,
    Usuarios,
}
// endregion: --- Cli

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load();
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    info!("{:<12} --> API: {}", "Main", config.api_url);

    let app = AppContext::new(&config);
    let result = run(&app, cli.command).await;
    print_toasts(&app.toasts);

    if let Err(e) = result {
        error!("{:<12} --> 명령 실패: {}", "Main", e);
        return Err(e.into());
    }
    Ok(())
}

async fn run(app: &AppContext, command: Command) -> Result<(), AppError> {
    match command {
        Command::Itens { campanha } => {
            let mut view = HomeView::new(app.api.clone(), app.toasts.clone(), campanha);
            view.load().await?;
            let config = view.config();
            println!("{}", config.nome_instituicao);
            println!("{}\n", config.mensagem_home);
            for item in view.items() {
                println!(
                    "#{:<4} {:<32} {:<16} {}",
                    item.id,
                    item.nome,
                    item.categoria.nome,
                    config.format_amount(item.lance_atual)
                );
            }
        }
        Command::Item { id } => {
            let mut view = ItemDetailsView::new(app.api.clone(), app.toasts.clone(), id);
            view.load().await?;
            if let Some(item) = view.item() {
                print_item(item, view.config());
            }
        }
        Command::Lance {
            item_id,
            nome,
            telefone,
            valor,
        } => {
            let mut view = ItemDetailsView::new(app.api.clone(), app.toasts.clone(), item_id);
            view.load().await?;
            let form = view.form_mut();
            form.set_name(&nome);
            form.set_phone(&telefone);
            if let Some(valor) = valor {
                form.set_amount(&valor);
            }
            view.submit().await?;
            if let Some(item) = view.item() {
                print_item(item, view.config());
            }
            println!("Próximo lance sugerido: {}", view.form().valor);
        }
        Command::Login { email, senha } => {
            LoginView::new(app.toasts.clone())
                .submit(&app.auth, &email, &senha)
                .await?;
        }
        Command::Logout => {
            app.auth.initialize(false).await?;
            let mut view = DashboardView::new(app.toasts.clone());
            view.logout(&app.auth).await;
        }
        Command::Dashboard => {
            if !authorize(app).await? {
                return Ok(());
            }
            let mut view = DashboardView::new(app.toasts.clone());
            view.load(&app.auth).await?;
            if let Some(data) = view.data() {
                let config = Configuration::default();
                println!("Campanhas ativas: {}", data.campanhas_ativas);
                println!("Itens cadastrados: {}", data.total_itens);
                println!("Lances recebidos: {}", data.total_lances);
                println!("Valor arrecadado: {}", config.format_amount(data.valor_arrecadado));
                println!("\nÚltimos lances:");
                for lance in &data.ultimos_lances {
                    println!(
                        "  {:<24} {:<24} {} {}",
                        lance.item.nome,
                        lance.nome_participante,
                        config.format_amount(lance.valor),
                        lance.data_lance.format("%d/%m/%Y %H:%M")
                    );
                }
            }
        }
        Command::Campanhas { status } => {
            for campanha in app.api.get_campaigns(status.as_deref()).await? {
                println!(
                    "#{:<4} {:<32} {} {}",
                    campanha.id, campanha.nome, campanha.ano, campanha.status
                );
            }
        }
        Command::Categorias => {
            for categoria in app.api.get_categories().await? {
                println!("#{:<4} {}", categoria.id, categoria.nome);
            }
        }
        Command::Lances {
            item,
            categoria,
            inicio,
            fim,
            csv,
        } => {
            if !authorize(app).await? {
                return Ok(());
            }
            if csv {
                print!("{}", app.api.export_bids_csv().await?);
                return Ok(());
            }
            let filters = BidFilters {
                item_id: item,
                categoria_id: categoria,
                data_inicio: inicio,
                data_fim: fim,
            };
            for lance in app.api.get_bids(&filters).await? {
                println!(
                    "#{:<4} {:<24} {:<24} {:<16} {:>10.2} {}",
                    lance.id,
                    lance.item.nome,
                    lance.nome_participante,
                    lance.telefone.unwrap_or_default(),
                    lance.valor,
                    lance.data_lance.format("%d/%m/%Y %H:%M:%S")
                );
            }
        }
        Command::Auditoria => {
            if !authorize(app).await? {
                return Ok(());
            }
            for entrada in app.api.get_audit_log().await? {
                let usuario = entrada.usuario.map(|u| u.nome).unwrap_or_default();
                println!(
                    "{} {:<20} {}",
                    entrada.data_acao.format("%d/%m/%Y %H:%M"),
                    usuario,
                    entrada.acao
                );
            }
        }
        Command::Usuarios => {
            if !authorize(app).await? {
                return Ok(());
            }
            for usuario in app.api.get_users().await? {
                println!(
                    "#{:<4} {:<24} {:<32} {}",
                    usuario.id, usuario.nome, usuario.email, usuario.permissao
                );
            }
        }
    }
    Ok(())
}

/// 보호된 명령 전에 세션 확인
async fn authorize(app: &AppContext) -> Result<bool, AppError> {
    app.auth.initialize(true).await?;
    match app.auth.access() {
        RouteAccess::Granted(_) => Ok(true),
        RouteAccess::Pending | RouteAccess::Denied => {
            app.toasts.show(ToastRequest::error(
                "Acesso negado",
                "Faça login com `leilao login` para continuar.",
            ));
            Ok(false)
        }
    }
}
// endregion: --- Main

// region:    --- Render
fn print_item(item: &Item, config: &Configuration) {
    println!("{}", config.nome_instituicao);
    println!("\n{} ({})", item.nome, item.categoria.nome);
    println!("Campanha: {}", item.campanha.nome);
    println!("Lance inicial: {}", config.format_amount(item.lance_inicial));
    println!("Lance atual: {}", config.format_amount(item.lance_atual));
    if !item.ultimos_lances.is_empty() {
        println!("Últimos lances:");
        for lance in &item.ultimos_lances {
            println!(
                "  {} {}",
                config.format_amount(lance.valor),
                lance.data.format("%d/%m/%Y %H:%M:%S")
            );
        }
    }
}

fn print_toasts(toasts: &ToastStore) {
    for toast in toasts.visible() {
        let marker = match toast.variant {
            ToastVariant::Default => "*",
            ToastVariant::Destructive => "!",
        };
        match toast.description {
            Some(description) => eprintln!("[{marker}] {}: {}", toast.title, description),
            None => eprintln!("[{marker}] {}", toast.title),
        }
    }
}
// endregion: --- Render
