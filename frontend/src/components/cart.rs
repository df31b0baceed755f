use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::layout::{money, use_notifier};
use crate::store::use_cart;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::checkout;
use storefront::models::ShippingAddress;
use storefront::{AppRoute, CartEntry};

#[component]
fn CartRow(entry: CartEntry) -> impl IntoView {
    let cart = use_cart();
    let id = entry.product.id;
    let name = entry.product.name.clone();

    view! {
        <tr>
            <td>
                <Link to=AppRoute::ProductDetail(id).to_path() class="link">{name}</Link>
            </td>
            <td>{money(entry.product.price)}</td>
            <td>
                <input
                    type="number"
                    min="0"
                    class="input input-bordered input-sm w-20"
                    prop:value=entry.quantity.to_string()
                    on:change=move |ev| {
                        let qty = event_target_value(&ev).parse().unwrap_or(0);
                        cart.cart.update(|c| c.update_quantity(id, qty));
                    }
                />
            </td>
            <td>{money(entry.line_total())}</td>
            <td>
                <button class="btn btn-ghost btn-xs" on:click=move |_| cart.cart.update(|c| c.remove_item(id))>
                    "Remove"
                </button>
            </td>
        </tr>
    }
}

#[component]
pub fn CartPage() -> impl IntoView {
    let cart = use_cart().cart;
    let auth = use_auth();

    let checkout_link = move || {
        if auth.state.get().is_authenticated {
            AppRoute::Checkout.to_path()
        } else {
            AppRoute::login_with_redirect(&AppRoute::Checkout.to_path())
        }
    };

    view! {
        <div class="max-w-4xl mx-auto p-4 space-y-4">
            <h1 class="text-2xl font-bold">"Shopping cart"</h1>
            <Show
                when=move || !cart.with(|c| c.is_empty())
                fallback=|| view! {
                    <p class="py-8">
                        "Your cart is empty. " <Link to="/products" class="link link-primary">"Browse products"</Link>
                    </p>
                }
            >
                <table class="table">
                    <thead>
                        <tr><th>"Product"</th><th>"Price"</th><th>"Qty"</th><th>"Subtotal"</th><th></th></tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || cart.with(|c| c.entries().to_vec())
                            key=|e| (e.product.id, e.quantity)
                            children=|e| view! { <CartRow entry=e /> }
                        />
                    </tbody>
                </table>
                <div class="flex items-center justify-between">
                    <button class="btn btn-ghost" on:click=move |_| cart.update(|c| c.clear())>"Clear cart"</button>
                    <div class="flex items-center gap-4">
                        <span class="text-xl font-semibold">
                            "Total: " {move || money(cart.with(|c| c.total_price()))}
                        </span>
                        {move || view! { <Link to=checkout_link() class="btn btn-primary">"Checkout"</Link> }}
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let api = use_api();
    let cart = use_cart().cart;
    let router = use_router();
    let notifier = use_notifier();

    let shipping = RwSignal::new(ShippingAddress::default());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let address = shipping.get();
        // 本地先校验，避免无意义的请求
        if let Err(e) = cart.with(|c| checkout::order_request(c, &address)) {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.get();
        let mut snapshot = cart.get();
        let ordered = snapshot.order_items();
        spawn_local(async move {
            match checkout::place_order(api.as_ref(), &mut snapshot, &address).await {
                Ok(order) => {
                    // 只扣除已下单的部分，请求期间新加入的商品保留
                    cart.update(|c| c.remove_ordered(&ordered));
                    notifier.success(format!("Order #{} placed", order.id));
                    router.navigate(&AppRoute::OrderDetail(order.id).to_path());
                }
                Err(e) => set_error_msg.set(Some(format!("Failed to place order: {}", e))),
            }
            set_is_submitting.set(false);
        });
    };

    let field = move |placeholder: &'static str, get: fn(&ShippingAddress) -> String, set: fn(&mut ShippingAddress, String)| {
        view! {
            <input
                type="text"
                placeholder=placeholder
                class="input input-bordered w-full"
                on:input=move |ev| shipping.update(|s| set(s, event_target_value(&ev)))
                prop:value=move || shipping.with(get)
                required
            />
        }
    };

    view! {
        <div class="max-w-xl mx-auto p-4 space-y-4">
            <h1 class="text-2xl font-bold">"Checkout"</h1>
            <p class="text-lg">
                {move || format!("{} items, total {}", cart.with(|c| c.item_count()), money(cart.with(|c| c.total_price())))}
            </p>
            <form class="card bg-base-100 shadow-xl card-body space-y-2" on:submit=on_submit>
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                {field("Address line", |s| s.shipping_address_line1.clone(), |s, v| s.shipping_address_line1 = v)}
                {field("City", |s| s.shipping_city.clone(), |s, v| s.shipping_city = v)}
                {field("Postal code", |s| s.shipping_postal_code.clone(), |s, v| s.shipping_postal_code = v)}
                {field("Country", |s| s.shipping_country.clone(), |s, v| s.shipping_country = v)}
                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() { "Placing order..." } else { "Place order" }}
                </button>
            </form>
        </div>
    }
}
