//! 提供者抽象接口
//!
//! 提供者是产出一个类型化值的可调用对象，可以声明它所依赖的其他类型。
//! 注册表构建器只通过 [`Provider`] 能力接口观察提供者：
//! 名称、签名（输入与输出的类型键）以及调用入口。

use infrastructure_common::{BoxError, TypeKey};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 已解析的值
pub type Value = Arc<dyn Any + Send + Sync>;

/// 调用函数类型
pub type InvokeFn = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// 将任意值包装为 [`Value`]
pub fn value<T: Send + Sync + 'static>(inner: T) -> Value {
    Arc::new(inner)
}

/// 提供者签名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// 输入类型（按声明顺序）
    pub inputs: Vec<TypeKey>,
    /// 输出类型（第一个为产出类型，可选第二个为错误形态）
    pub outputs: Vec<TypeKey>,
}

/// 提供者 trait
pub trait Provider: Send + Sync {
    /// 尽力获取的显示名称
    fn name(&self) -> Option<&str>;

    /// 签名，`None` 表示不可调用
    fn signature(&self) -> Option<Signature>;

    /// 以已解析的依赖调用提供者
    fn call(&self, args: &[Value]) -> Result<Value, BoxError>;
}

impl fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name())
            .field("signature", &self.signature())
            .finish()
    }
}

/// 从函数类型路径推导显示名称
///
/// 闭包没有可用的名称，返回 `None`。
pub fn derive_fn_name(type_name: &str) -> Option<String> {
    if type_name.contains("{{closure}}") {
        return None;
    }
    let path = type_name.split('<').next().unwrap_or(type_name);
    path.rsplit("::")
        .next()
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

fn downcast_arg<A: Clone + 'static>(arg: Option<&Value>) -> Result<A, BoxError> {
    arg.and_then(|value| value.downcast_ref::<A>())
        .cloned()
        .ok_or_else(|| format!("argument is not a {}", TypeKey::of::<A>()).into())
}

/// 不会失败的提供者函数
///
/// 为 0 到 8 个参数的 `Fn(A, B, ..) -> T` 自动实现。
pub trait ProviderFn<Args>: Send + Sync + 'static {
    /// 产出类型
    type Output: Clone + Send + Sync + 'static;

    /// 依赖类型
    fn inputs() -> Vec<TypeKey>;

    /// 调用
    fn invoke(&self, args: &[Value]) -> Result<Self::Output, BoxError>;
}

/// 可能失败的提供者函数
///
/// 为 0 到 8 个参数的 `Fn(A, B, ..) -> Result<T, E>` 自动实现。
pub trait FallibleProviderFn<Args>: Send + Sync + 'static {
    /// 产出类型
    type Output: Clone + Send + Sync + 'static;

    /// 依赖类型
    fn inputs() -> Vec<TypeKey>;

    /// 调用
    fn invoke(&self, args: &[Value]) -> Result<Self::Output, BoxError>;
}

macro_rules! impl_provider_fn {
    ($($A:ident),*) => {
        impl<Func, Out, $($A,)*> ProviderFn<($($A,)*)> for Func
        where
            Func: Fn($($A),*) -> Out + Send + Sync + 'static,
            Out: Clone + Send + Sync + 'static,
            $($A: Clone + Send + Sync + 'static,)*
        {
            type Output = Out;

            fn inputs() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$A>()),*]
            }

            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn invoke(&self, args: &[Value]) -> Result<Out, BoxError> {
                let mut args = args.iter();
                $(let $A = downcast_arg::<$A>(args.next())?;)*
                Ok((self)($($A),*))
            }
        }

        impl<Func, Out, E, $($A,)*> FallibleProviderFn<($($A,)*)> for Func
        where
            Func: Fn($($A),*) -> Result<Out, E> + Send + Sync + 'static,
            Out: Clone + Send + Sync + 'static,
            E: Into<BoxError>,
            $($A: Clone + Send + Sync + 'static,)*
        {
            type Output = Out;

            fn inputs() -> Vec<TypeKey> {
                vec![$(TypeKey::of::<$A>()),*]
            }

            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn invoke(&self, args: &[Value]) -> Result<Out, BoxError> {
                let mut args = args.iter();
                $(let $A = downcast_arg::<$A>(args.next())?;)*
                (self)($($A),*).map_err(Into::into)
            }
        }
    };
}

impl_provider_fn!();
impl_provider_fn!(A1);
impl_provider_fn!(A1, A2);
impl_provider_fn!(A1, A2, A3);
impl_provider_fn!(A1, A2, A3, A4);
impl_provider_fn!(A1, A2, A3, A4, A5);
impl_provider_fn!(A1, A2, A3, A4, A5, A6);
impl_provider_fn!(A1, A2, A3, A4, A5, A6, A7);
impl_provider_fn!(A1, A2, A3, A4, A5, A6, A7, A8);

/// 函数提供者包装器
pub struct FnProvider<F, Args> {
    func: F,
    name: Option<String>,
    _args: PhantomData<fn(Args)>,
}

impl<F, Args> FnProvider<F, Args> {
    /// 设置显示名称
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<F, Args> Provider for FnProvider<F, Args>
where
    F: ProviderFn<Args>,
    Args: 'static,
{
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn signature(&self) -> Option<Signature> {
        Some(Signature {
            inputs: F::inputs(),
            outputs: vec![TypeKey::of::<F::Output>()],
        })
    }

    fn call(&self, args: &[Value]) -> Result<Value, BoxError> {
        let out = self.func.invoke(args)?;
        Ok(Arc::new(out))
    }
}

/// 可失败函数提供者包装器
pub struct FallibleFnProvider<F, Args> {
    func: F,
    name: Option<String>,
    _args: PhantomData<fn(Args)>,
}

impl<F, Args> FallibleFnProvider<F, Args> {
    /// 设置显示名称
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl<F, Args> Provider for FallibleFnProvider<F, Args>
where
    F: FallibleProviderFn<Args>,
    Args: 'static,
{
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn signature(&self) -> Option<Signature> {
        Some(Signature {
            inputs: F::inputs(),
            outputs: vec![TypeKey::of::<F::Output>(), TypeKey::error()],
        })
    }

    fn call(&self, args: &[Value]) -> Result<Value, BoxError> {
        let out = self.func.invoke(args)?;
        Ok(Arc::new(out))
    }
}

/// 包装不会失败的函数
///
/// ```
/// use di_abstractions::{provider, Provider, TypeKey};
///
/// fn port() -> u16 {
///     8080
/// }
///
/// let p = provider(port);
/// assert_eq!(p.name(), Some("port"));
/// assert_eq!(p.signature().unwrap().outputs, vec![TypeKey::of::<u16>()]);
/// ```
pub fn provider<F, Args>(func: F) -> FnProvider<F, Args>
where
    F: ProviderFn<Args>,
{
    FnProvider {
        name: derive_fn_name(std::any::type_name::<F>()),
        func,
        _args: PhantomData,
    }
}

/// 包装可能失败的函数，签名的第二个输出为错误形态
pub fn fallible<F, Args>(func: F) -> FallibleFnProvider<F, Args>
where
    F: FallibleProviderFn<Args>,
{
    FallibleFnProvider {
        name: derive_fn_name(std::any::type_name::<F>()),
        func,
        _args: PhantomData,
    }
}

/// 手工描述的提供者
///
/// 输入、输出与调用入口全部由调用方声明，注册表构建器会在运行时校验其形态。
#[derive(Clone, Default)]
pub struct DynProvider {
    name: Option<String>,
    inputs: Vec<TypeKey>,
    outputs: Vec<TypeKey>,
    invoke: Option<InvokeFn>,
}

impl DynProvider {
    /// 创建空的提供者描述
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置显示名称
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 添加输入类型
    pub fn input(mut self, key: TypeKey) -> Self {
        self.inputs.push(key);
        self
    }

    /// 添加输出类型
    pub fn output(mut self, key: TypeKey) -> Self {
        self.outputs.push(key);
        self
    }

    /// 设置调用入口
    pub fn invoke<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.invoke = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for DynProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynProvider")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("invoke", &self.invoke.as_ref().map(|_| "<function>"))
            .finish()
    }
}

impl Provider for DynProvider {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn signature(&self) -> Option<Signature> {
        self.invoke.as_ref().map(|_| Signature {
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
        })
    }

    fn call(&self, args: &[Value]) -> Result<Value, BoxError> {
        match &self.invoke {
            Some(invoke) => invoke(args),
            None => Err("provider is not callable".into()),
        }
    }
}
