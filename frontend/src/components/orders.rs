use crate::api::use_api;
use crate::components::layout::{Spinner, money, use_notifier};
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::models::{Order, OrderId};

fn status_badge(status: &str) -> &'static str {
    match status {
        "pending" => "badge badge-warning",
        "shipped" | "delivered" | "completed" => "badge badge-success",
        "cancelled" => "badge badge-error",
        _ => "badge",
    }
}

#[component]
pub fn OrderHistoryPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);

    {
        let api = api.get();
        spawn_local(async move {
            match api.list_orders().await {
                Ok(data) => set_orders.set(data),
                Err(e) => notifier.error(format!("Failed to load orders: {}", e)),
            }
            set_loading.set(false);
        });
    }

    view! {
        <div class="max-w-4xl mx-auto p-4 space-y-4">
            <h1 class="text-2xl font-bold">"My orders"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <Show
                    when=move || orders.with(|o| !o.is_empty())
                    fallback=|| view! { <p class="py-8">"You have not placed any orders yet."</p> }
                >
                    <table class="table">
                        <thead>
                            <tr><th>"Order"</th><th>"Date"</th><th>"Status"</th><th>"Total"</th></tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || orders.get()
                                key=|o| o.id
                                children=|o| view! {
                                    <tr>
                                        <td>
                                            <Link to=AppRoute::OrderDetail(o.id).to_path() class="link link-primary">
                                                {format!("#{}", o.id)}
                                            </Link>
                                        </td>
                                        <td>{o.created_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                        <td><span class=status_badge(&o.status)>{o.status.clone()}</span></td>
                                        <td>{money(o.total_price)}</td>
                                    </tr>
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}

#[component]
pub fn OrderDetailPage(id: OrderId) -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let (order, set_order) = signal(Option::<Order>::None);
    let (loading, set_loading) = signal(true);

    {
        let api = api.get();
        spawn_local(async move {
            match api.get_order(id).await {
                Ok(o) => set_order.set(Some(o)),
                Err(e) => notifier.error(format!("Failed to load order #{}: {}", id, e)),
            }
            set_loading.set(false);
        });
    }

    view! {
        <div class="max-w-4xl mx-auto p-4 space-y-4">
            <Link to="/orders" class="link">"← Back to orders"</Link>
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                {move || order.get().map(|o| {
                    let address = format!(
                        "{}, {} {}, {}",
                        o.shipping.shipping_address_line1,
                        o.shipping.shipping_city,
                        o.shipping.shipping_postal_code,
                        o.shipping.shipping_country,
                    );
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h1 class="card-title">
                                    {format!("Order #{}", o.id)}
                                    <span class=status_badge(&o.status)>{o.status.clone()}</span>
                                </h1>
                                <p>{format!("Placed {}", o.created_at.format("%Y-%m-%d %H:%M"))}</p>
                                <p>{format!("Ship to: {}", address)}</p>
                                <table class="table">
                                    <thead>
                                        <tr><th>"Product"</th><th>"Qty"</th><th>"Unit price"</th><th>"Subtotal"</th></tr>
                                    </thead>
                                    <tbody>
                                        {o.items.iter().map(|item| view! {
                                            <tr>
                                                <td>{item.product.name.clone()}</td>
                                                <td>{item.quantity}</td>
                                                <td>{money(item.price_at_time_of_purchase)}</td>
                                                <td>{money(item.price_at_time_of_purchase * item.quantity as f64)}</td>
                                            </tr>
                                        }).collect_view()}
                                    </tbody>
                                </table>
                                <p class="text-right text-xl font-semibold">{format!("Total: {}", money(o.total_price))}</p>
                            </div>
                        </div>
                    }
                })}
            </Show>
        </div>
    }
}
