use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::layout::{Spinner, money, use_notifier};
use crate::store::{use_cart, use_categories};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront::AppRoute;
use storefront::models::{Product, ProductId};

/// 解析数量输入框，非法或小于 1 的输入按 1 处理
fn parse_quantity(raw: &str) -> i64 {
    raw.trim().parse::<i64>().map_or(1, |qty| qty.max(1))
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let api = use_api();
    let cart = use_cart();
    let categories = use_categories();
    let notifier = use_notifier();

    let image = product.image_url.as_deref().map(|u| api.asset_url(u));
    let category = product.category_id.and_then(|id| categories.name_of(id));
    let detail = AppRoute::ProductDetail(product.id).to_path();
    let name = product.name.clone();
    let price = money(product.price);

    let on_add = move |_| {
        cart.add(&product, 1);
        notifier.success(format!("{} added to cart", product.name));
    };

    view! {
        <div class="card bg-base-100 shadow-md">
            {image.map(|src| view! {
                <figure class="h-48 bg-base-200">
                    <img src=src alt=name.clone() class="object-cover h-full w-full" />
                </figure>
            })}
            <div class="card-body">
                <h2 class="card-title">
                    <Link to=detail>{name.clone()}</Link>
                </h2>
                {category.map(|c| view! { <span class="badge badge-outline">{c}</span> })}
                <p class="text-lg font-semibold">{price}</p>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary btn-sm" on:click=on_add>"Add to cart"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ProductListPage() -> impl IntoView {
    let api = use_api();
    let categories = use_categories();
    let notifier = use_notifier();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (query, set_query) = signal(String::new());
    let (category_filter, set_category_filter) = signal(Option::<i64>::None);

    categories.fetch(api);

    // 查询为空时列出全部商品
    let load = move |search: String| {
        let api = api.get();
        set_loading.set(true);
        spawn_local(async move {
            let search = search.trim();
            let result = if search.is_empty() {
                api.list_products().await
            } else {
                api.search_products(search).await
            };
            match result {
                Ok(data) => set_products.set(data),
                Err(e) => notifier.error(format!("Failed to load products: {}", e)),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load(String::new());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load(query.get());
    };

    let visible = move || {
        let filter = category_filter.get();
        products.with(|list| {
            list.iter()
                .filter(|p| filter.is_none() || p.category_id == filter)
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="max-w-7xl mx-auto p-4 space-y-6">
            <form class="flex flex-wrap gap-2" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search products"
                    class="input input-bordered flex-1"
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    prop:value=query
                />
                <select
                    class="select select-bordered"
                    disabled=move || categories.is_loading.get()
                    on:change=move |ev| set_category_filter.set(event_target_value(&ev).parse().ok())
                >
                    <option value="">"All categories"</option>
                    <For
                        each=move || categories.categories.get()
                        key=|c| c.id
                        children=|c| view! { <option value=c.id.to_string()>{c.name}</option> }
                    />
                </select>
                <button class="btn btn-primary">"Search"</button>
            </form>

            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                <Show
                    when=move || !visible().is_empty()
                    fallback=|| view! { <p class="text-center text-base-content/60 py-16">"No products found"</p> }
                >
                    <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                        <For
                            each=visible
                            key=|p| p.id
                            children=|p| view! { <ProductCard product=p /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
pub fn ProductDetailPage(id: ProductId) -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let cart = use_cart();
    let router = use_router();
    let notifier = use_notifier();
    let categories = use_categories();

    let (product, set_product) = signal(Option::<Product>::None);
    let (loading, set_loading) = signal(true);
    let (quantity, set_quantity) = signal(1_i64);

    categories.fetch(api);
    {
        let api = api.get();
        spawn_local(async move {
            match api.get_product(id).await {
                Ok(p) => set_product.set(Some(p)),
                Err(e) => notifier.error(format!("Failed to load product: {}", e)),
            }
            set_loading.set(false);
        });
    }

    let on_add = move |_| {
        if let Some(p) = product.get() {
            let qty = quantity.get();
            cart.add(&p, qty);
            notifier.success(format!("{} x {} added to cart", qty, p.name));
        }
    };

    let on_delete = move |_| {
        let api = api.get();
        spawn_local(async move {
            match api.delete_product(id).await {
                Ok(()) => {
                    notifier.success("Product deleted");
                    router.navigate(&AppRoute::ProductList.to_path());
                }
                Err(e) => notifier.error(format!("Failed to delete product: {}", e)),
            }
        });
    };

    view! {
        <div class="max-w-4xl mx-auto p-4">
            <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                {move || product.get().map(|p| {
                    let image = p.image_url.as_deref().map(|u| api.asset_url(u));
                    let category = p.category_id.and_then(|c| categories.name_of(c));
                    view! {
                        <div class="card lg:card-side bg-base-100 shadow-xl">
                            {image.map(|src| view! {
                                <figure class="lg:w-1/2"><img src=src alt=p.name.clone() /></figure>
                            })}
                            <div class="card-body">
                                <h1 class="card-title text-3xl">{p.name.clone()}</h1>
                                {category.map(|c| view! { <span class="badge badge-outline">{c}</span> })}
                                <p class="text-2xl font-semibold">{money(p.price)}</p>
                                <p>{p.description.clone().unwrap_or_default()}</p>
                                <div class="card-actions items-center justify-end">
                                    <input
                                        type="number"
                                        min="1"
                                        class="input input-bordered w-24"
                                        on:input=move |ev| set_quantity.set(parse_quantity(&event_target_value(&ev)))
                                        prop:value=move || quantity.get().to_string()
                                    />
                                    <button class="btn btn-primary" on:click=on_add>"Add to cart"</button>
                                </div>
                                <Show when=move || auth.state.get().is_authenticated>
                                    <div class="card-actions justify-end">
                                        <Link to=AppRoute::EditProduct(id).to_path() class="btn btn-outline btn-sm">"Edit"</Link>
                                        <button class="btn btn-error btn-sm" on:click=on_delete>"Delete"</button>
                                    </div>
                                </Show>
                            </div>
                        </div>
                    }
                })}
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_input_never_goes_below_one() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("-4"), 1);
        assert_eq!(parse_quantity("lots"), 1);
        assert_eq!(parse_quantity(""), 1);
    }
}
